use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside the WGS84 degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A named point of the itinerary. The id is opaque: either a place id from
/// the search provider or a synthetic one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
}

/// Path geometry as the provider handed it over. Encoded strings stay encoded
/// until something needs to draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polyline {
    Path(Vec<Coordinate>),
    Encoded(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentSource {
    /// Metrics and geometry came from the routing provider.
    Provided,
    /// Provider failed; straight-line walking estimate, no geometry.
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Stop,
    pub to: Stop,
    pub distance_m: u64,
    /// Door-to-door duration, waits included.
    pub duration_s: u64,
    /// Sum of the legs' own durations.
    pub travel_duration_s: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<Polyline>,
    pub source: SegmentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRoute {
    pub segments: Vec<Segment>,
    pub distance_m: u64,
    pub duration_s: u64,
    pub travel_duration_s: u64,
}

impl TripRoute {
    /// Totals are always derived from the segments, never stored separately.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let distance_m = segments.iter().map(|s| s.distance_m).sum();
        let duration_s = segments.iter().map(|s| s.duration_s).sum();
        let travel_duration_s = segments.iter().map(|s| s.travel_duration_s).sum();
        Self {
            segments,
            distance_m,
            duration_s,
            travel_duration_s,
        }
    }

    pub fn estimated_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.source == SegmentSource::Estimated)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RouteBounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let seed = RouteBounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        Some(iter.fold(seed, |b, c| RouteBounds {
            min_lat: b.min_lat.min(c.lat),
            max_lat: b.max_lat.max(c.lat),
            min_lon: b.min_lon.min(c.lon),
            max_lon: b.max_lon.max(c.lon),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopMarker {
    /// 1-based position in the itinerary.
    pub order: usize,
    pub stop_id: String,
    pub name: String,
    pub location: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPath {
    pub segment_index: usize,
    pub source: SegmentSource,
    pub points: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOverlay {
    pub markers: Vec<StopMarker>,
    pub paths: Vec<SegmentPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RouteBounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRouteRequest {
    pub stops: Vec<Stop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRouteResponse {
    pub route: Option<TripRoute>,
    pub overlay: Option<MapOverlay>,
    pub gpx_base64: Option<String>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop {
            id: id.into(),
            name: id.to_uppercase(),
            location: Coordinate::new(lat, lon),
        }
    }

    fn segment(distance_m: u64, duration_s: u64, travel_duration_s: u64, source: SegmentSource) -> Segment {
        Segment {
            from: stop("a", 37.5, 127.0),
            to: stop("b", 37.51, 127.01),
            distance_m,
            duration_s,
            travel_duration_s,
            polyline: None,
            source,
        }
    }

    #[test]
    fn trip_totals_are_segment_sums() {
        let trip = TripRoute::from_segments(vec![
            segment(1000, 600, 540, SegmentSource::Provided),
            segment(250, 300, 300, SegmentSource::Estimated),
        ]);
        assert_eq!(trip.distance_m, 1250);
        assert_eq!(trip.duration_s, 900);
        assert_eq!(trip.travel_duration_s, 840);
        assert_eq!(trip.estimated_segments(), 1);
    }

    #[test]
    fn empty_trip_has_zero_totals() {
        let trip = TripRoute::from_segments(Vec::new());
        assert_eq!(trip.distance_m, 0);
        assert_eq!(trip.duration_s, 0);
    }

    #[test]
    fn coordinate_validation() {
        assert!(Coordinate::new(37.5, 127.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            Coordinate::new(37.5, 127.0),
            Coordinate::new(37.6, 126.9),
            Coordinate::new(37.4, 127.2),
        ];
        let bounds = RouteBounds::from_points(&points).expect("bounds");
        assert_eq!(bounds.min_lat, 37.4);
        assert_eq!(bounds.max_lat, 37.6);
        assert_eq!(bounds.min_lon, 126.9);
        assert_eq!(bounds.max_lon, 127.2);
        assert!(RouteBounds::from_points(&Vec::<Coordinate>::new()).is_none());
    }

    #[test]
    fn polyline_serializes_externally_tagged() {
        let encoded = Polyline::Encoded("_p~iF~ps|U".into());
        let json = serde_json::to_value(&encoded).unwrap();
        assert_eq!(json, serde_json::json!({ "encoded": "_p~iF~ps|U" }));

        let source = serde_json::to_value(SegmentSource::Estimated).unwrap();
        assert_eq!(source, serde_json::json!("estimated"));
    }
}
