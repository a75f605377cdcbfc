use crate::{
    error::ProviderError,
    models::{Coordinate, Polyline},
    routing::{millis_to_seconds, round_meters, round_non_negative},
    wire::{RawDuration, RawLeg, RawRoute, RoutesResponse},
};

/// One provider route reduced to the numbers a segment needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub distance_m: u64,
    pub duration_s: u64,
    pub travel_duration_s: u64,
    pub polyline: Option<Polyline>,
}

/// Pick the first candidate route and normalize it.
///
/// Field priority for durations, at route and leg level alike:
/// `durationMillis`, then `duration` (number of seconds or `"600s"`).
/// Travel duration is always the sum of the legs, independent of the
/// route-level total.
pub fn first_route(response: &RoutesResponse) -> Result<ProviderRoute, ProviderError> {
    let route = response.routes.first().ok_or(ProviderError::NoRoutes)?;
    normalize_route(route)
}

pub fn normalize_route(route: &RawRoute) -> Result<ProviderRoute, ProviderError> {
    if route.legs.is_empty() {
        return Err(ProviderError::MissingLegs);
    }

    let travel_duration_s = route.legs.iter().map(leg_duration_s).sum();
    let duration_s =
        duration_s(route.duration_millis, route.duration.as_ref()).unwrap_or(travel_duration_s);
    let distance_m = match route.distance_meters {
        Some(meters) => round_meters(meters),
        None => route
            .legs
            .iter()
            .filter_map(|leg| leg.distance_meters)
            .map(round_meters)
            .sum(),
    };

    Ok(ProviderRoute {
        distance_m,
        duration_s,
        travel_duration_s,
        polyline: extract_polyline(route),
    })
}

fn leg_duration_s(leg: &RawLeg) -> u64 {
    duration_s(leg.duration_millis, leg.duration.as_ref()).unwrap_or(0)
}

fn duration_s(millis: Option<f64>, fallback: Option<&RawDuration>) -> Option<u64> {
    if let Some(ms) = millis {
        return Some(millis_to_seconds(ms));
    }
    fallback
        .and_then(RawDuration::as_seconds)
        .map(round_non_negative)
}

/// Explicit path wins over an encoded string; empty shapes count as absent.
fn extract_polyline(route: &RawRoute) -> Option<Polyline> {
    if let Some(path) = route.path.as_ref().filter(|p| !p.is_empty()) {
        let coords = path
            .iter()
            .map(|point| {
                let (lat, lon) = point.lat_lon();
                Coordinate { lat, lon }
            })
            .collect();
        return Some(Polyline::Path(coords));
    }

    route
        .polyline
        .as_ref()
        .map(|p| p.encoded())
        .filter(|encoded| !encoded.is_empty())
        .map(|encoded| Polyline::Encoded(encoded.to_string()))
}
