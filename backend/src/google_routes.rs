//! Routes API client (`directions/v2:computeRoutes`).

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    models::Coordinate,
    provider::{RouteProvider, RouteQuery, TravelMode},
    wire::RoutesResponse,
};

pub const DEFAULT_ENDPOINT: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

/// Only the fields [`crate::normalize`] reads.
const FIELD_MASK: &str = "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline,\
routes.legs.distanceMeters,routes.legs.duration";

pub struct GoogleRoutesProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    language_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest<'a> {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    compute_alternative_routes: bool,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinate> for Waypoint {
    fn from(coord: Coordinate) -> Self {
        Waypoint {
            location: Location {
                lat_lng: LatLng {
                    latitude: coord.lat,
                    longitude: coord.lon,
                },
            },
        }
    }
}

impl GoogleRoutesProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: non_empty(config.api_key.as_deref()),
            language_code: non_empty(config.language_code.as_deref()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body<'a>(&'a self, query: &RouteQuery) -> ComputeRoutesRequest<'a> {
        ComputeRoutesRequest {
            origin: query.origin.into(),
            destination: query.destination.into(),
            travel_mode: query.mode,
            departure_time: query.departure_time,
            language_code: self.language_code.as_deref(),
            compute_alternative_routes: false,
        }
    }
}

impl RouteProvider for GoogleRoutesProvider {
    async fn compute_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&self.request_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let routes: RoutesResponse = response.json().await?;
        tracing::debug!("provider returned {} candidate route(s)", routes.routes.len());
        Ok(routes)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
