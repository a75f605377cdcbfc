use chrono::{DateTime, Utc};

use crate::{
    error::ProviderError,
    models::{Segment, SegmentSource, Stop, TripRoute},
    normalize::{self, ProviderRoute},
    provider::{RouteProvider, RouteQuery},
    routing::{haversine_m, round_meters, walking_duration_s},
};

/// Builds a [`TripRoute`] from an ordered list of stops, one provider call per
/// adjacent pair.
///
/// # Algorithm
///
/// ```text
/// for (from, to) in stops.windows(2):
///     provider ok   -> Segment::Provided (provider metrics + polyline)
///     provider fail -> Segment::Estimated (haversine distance, 50 m/min walk)
/// TripRoute = sum of segment metrics
/// ```
///
/// Pairs are routed strictly in order, each call awaited before the next one
/// starts. A failing pair never aborts the others, so the result always has
/// `stops.len() - 1` segments.
pub struct RouteAggregator<P> {
    provider: P,
}

impl<P: RouteProvider> RouteAggregator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `None` when fewer than two stops are given.
    pub async fn compute_trip_route(&self, stops: &[Stop]) -> Option<TripRoute> {
        self.compute_trip_route_departing(stops, None).await
    }

    /// Same as [`Self::compute_trip_route`], forwarding a transit departure
    /// time to every provider query.
    pub async fn compute_trip_route_departing(
        &self,
        stops: &[Stop],
        departure_time: Option<DateTime<Utc>>,
    ) -> Option<TripRoute> {
        if stops.len() < 2 {
            tracing::debug!("no route for {} stop(s)", stops.len());
            return None;
        }

        let segment_count = stops.len() - 1;
        let mut segments = Vec::with_capacity(segment_count);

        for (index, pair) in stops.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            let query = RouteQuery::transit(from.location, to.location, departure_time);

            let segment = match self.route_pair(&query).await {
                Ok(route) => {
                    tracing::debug!(
                        "Segment {}/{} {} -> {}: {}m, {}s",
                        index + 1,
                        segment_count,
                        from.name,
                        to.name,
                        route.distance_m,
                        route.duration_s
                    );
                    provided_segment(from, to, route)
                }
                Err(err) => {
                    tracing::warn!(
                        "Segment {}/{} {} -> {}: provider failed ({}), using straight-line estimate",
                        index + 1,
                        segment_count,
                        from.name,
                        to.name,
                        err
                    );
                    estimated_segment(from, to)
                }
            };
            segments.push(segment);
        }

        let trip = TripRoute::from_segments(segments);
        tracing::info!(
            "Trip route computed: {} segments ({} estimated), {}m, {}s",
            trip.segments.len(),
            trip.estimated_segments(),
            trip.distance_m,
            trip.duration_s
        );
        Some(trip)
    }

    async fn route_pair(&self, query: &RouteQuery) -> Result<ProviderRoute, ProviderError> {
        let response = self.provider.compute_routes(query).await?;
        normalize::first_route(&response)
    }
}

fn provided_segment(from: &Stop, to: &Stop, route: ProviderRoute) -> Segment {
    Segment {
        from: from.clone(),
        to: to.clone(),
        distance_m: route.distance_m,
        duration_s: route.duration_s,
        travel_duration_s: route.travel_duration_s,
        polyline: route.polyline,
        source: SegmentSource::Provided,
    }
}

/// Great-circle distance walked at constant speed; no geometry.
pub fn estimated_segment(from: &Stop, to: &Stop) -> Segment {
    let distance_m = round_meters(haversine_m(from.location, to.location));
    let duration_s = walking_duration_s(distance_m);
    Segment {
        from: from.clone(),
        to: to.clone(),
        distance_m,
        duration_s,
        travel_duration_s: duration_s,
        polyline: None,
        source: SegmentSource::Estimated,
    }
}
