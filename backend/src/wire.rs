//! Raw routing provider payloads.
//!
//! Two client generations return routes in different shapes: the browser
//! library reports `durationMillis` and an explicit `path`, the REST endpoint
//! reports `duration: "600s"` and an encoded `polyline`. Both deserialize into
//! the same types here; [`crate::normalize`] decides which field wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<RawDuration>,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<RawLatLng>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<RawPolyline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<RawDuration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(f64),
    /// Protobuf JSON duration, e.g. `"600s"` or `"12.5s"`.
    Text(String),
}

impl RawDuration {
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            RawDuration::Seconds(secs) => Some(*secs),
            RawDuration::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .strip_suffix('s')
                    .unwrap_or(trimmed)
                    .trim()
                    .parse::<f64>()
                    .ok()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLatLng {
    Short { lat: f64, lng: f64 },
    Long { latitude: f64, longitude: f64 },
}

impl RawLatLng {
    pub fn lat_lon(self) -> (f64, f64) {
        match self {
            RawLatLng::Short { lat, lng } => (lat, lng),
            RawLatLng::Long {
                latitude,
                longitude,
            } => (latitude, longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPolyline {
    Object {
        #[serde(rename = "encodedPolyline")]
        encoded_polyline: String,
    },
    Text(String),
}

impl RawPolyline {
    pub fn encoded(&self) -> &str {
        match self {
            RawPolyline::Object { encoded_polyline } => encoded_polyline,
            RawPolyline::Text(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rest_shape() {
        let response: RoutesResponse = serde_json::from_value(json!({
            "routes": [{
                "distanceMeters": 1532,
                "duration": "845s",
                "polyline": { "encodedPolyline": "_p~iF~ps|U" },
                "legs": [{ "distanceMeters": 1532, "duration": "780s" }]
            }]
        }))
        .unwrap();

        let route = &response.routes[0];
        assert_eq!(route.distance_meters, Some(1532.0));
        assert_eq!(route.duration, Some(RawDuration::Text("845s".into())));
        assert_eq!(route.polyline.as_ref().map(RawPolyline::encoded), Some("_p~iF~ps|U"));
        assert_eq!(route.legs.len(), 1);
    }

    #[test]
    fn parses_browser_library_shape() {
        let response: RoutesResponse = serde_json::from_value(json!({
            "routes": [{
                "distanceMeters": 1000,
                "durationMillis": 600000,
                "path": [{ "lat": 37.5, "lng": 127.0 }, { "lat": 37.51, "lng": 127.01 }],
                "legs": [{ "durationMillis": 600000 }]
            }]
        }))
        .unwrap();

        let route = &response.routes[0];
        assert_eq!(route.duration_millis, Some(600_000.0));
        let path = route.path.as_ref().unwrap();
        assert_eq!(path[1].lat_lon(), (37.51, 127.01));
    }

    #[test]
    fn empty_body_has_no_routes() {
        let response: RoutesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }

    #[test]
    fn duration_text_forms() {
        assert_eq!(RawDuration::Text("600s".into()).as_seconds(), Some(600.0));
        assert_eq!(RawDuration::Text("12.5s".into()).as_seconds(), Some(12.5));
        assert_eq!(RawDuration::Text(" 42 ".into()).as_seconds(), Some(42.0));
        assert_eq!(RawDuration::Text("soon".into()).as_seconds(), None);
        assert_eq!(RawDuration::Seconds(30.0).as_seconds(), Some(30.0));
    }

    #[test]
    fn long_form_lat_lng() {
        let point: RawLatLng =
            serde_json::from_value(json!({ "latitude": 37.5, "longitude": 127.0 })).unwrap();
        assert_eq!(point.lat_lon(), (37.5, 127.0));
    }
}
