use crate::{
    models::{Coordinate, MapOverlay, Polyline, RouteBounds, SegmentPath, Stop, StopMarker, TripRoute},
    polyline::{self, PolylineError},
};

/// Turn a computed trip into what the map draws: a marker per stop and a path
/// per segment that has geometry.
///
/// Segments without a polyline (straight-line estimates) are skipped, as are
/// encoded polylines that fail to decode. Neither is an error; the map simply
/// shows the markers without a connecting path.
pub fn render_trip(stops: &[Stop], route: &TripRoute) -> MapOverlay {
    let markers: Vec<StopMarker> = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| StopMarker {
            order: i + 1,
            stop_id: stop.id.clone(),
            name: stop.name.clone(),
            location: stop.location,
        })
        .collect();

    let mut paths = Vec::with_capacity(route.segments.len());
    for (segment_index, segment) in route.segments.iter().enumerate() {
        let Some(line) = &segment.polyline else {
            continue;
        };
        match resolve_polyline(line) {
            Ok(points) if !points.is_empty() => paths.push(SegmentPath {
                segment_index,
                source: segment.source,
                points,
            }),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    "Skipping path for segment {} ({} -> {}): {}",
                    segment_index + 1,
                    segment.from.name,
                    segment.to.name,
                    err
                );
            }
        }
    }

    let bounds = RouteBounds::from_points(
        markers
            .iter()
            .map(|m| &m.location)
            .chain(paths.iter().flat_map(|p| p.points.iter())),
    );

    tracing::debug!(
        "Rendered {} markers and {}/{} segment paths",
        markers.len(),
        paths.len(),
        route.segments.len()
    );

    MapOverlay {
        markers,
        paths,
        bounds,
    }
}

/// Explicit paths are used as-is; encoded strings are decoded here, lazily.
pub fn resolve_polyline(line: &Polyline) -> Result<Vec<Coordinate>, PolylineError> {
    match line {
        Polyline::Path(points) => Ok(points.clone()),
        Polyline::Encoded(encoded) => polyline::decode(encoded),
    }
}
