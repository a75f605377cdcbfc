use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::RouteError;
use crate::models::{Coordinate, MapOverlay};

const CREATOR: &str = "trip-router";

/// GPX 1.1 with one waypoint per stop and one track per drawn segment,
/// base64 encoded for sharing.
pub fn encode_overlay_as_gpx(overlay: &MapOverlay) -> Result<String, RouteError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };

    for marker in &overlay.markers {
        let mut waypoint = to_waypoint(&marker.location);
        waypoint.name = Some(format!("{}. {}", marker.order, marker.name));
        gpx.waypoints.push(waypoint);
    }

    for path in &overlay.paths {
        let mut track = Track {
            name: Some(format!("segment {}", path.segment_index + 1)),
            ..Default::default()
        };
        let mut segment = TrackSegment::new();
        segment.points.extend(path.points.iter().map(to_waypoint));
        track.segments.push(segment);
        gpx.tracks.push(track);
    }

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}
