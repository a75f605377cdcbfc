use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::ProviderError, models::Coordinate, wire::RoutesResponse};

/// Only transit is requested: the target region offers no driving
/// directions through the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Transit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
    pub departure_time: Option<DateTime<Utc>>,
}

impl RouteQuery {
    pub fn transit(
        origin: Coordinate,
        destination: Coordinate,
        departure_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            origin,
            destination,
            mode: TravelMode::Transit,
            departure_time,
        }
    }
}

/// Routing backend for a single origin/destination pair.
///
/// Implementations return the provider payload as-is; picking a route and
/// reconciling field shapes happens in [`crate::normalize`]. The aggregator
/// owns its provider, so tests swap in scripted implementations without any
/// global client.
pub trait RouteProvider: Send + Sync {
    fn compute_routes(
        &self,
        query: &RouteQuery,
    ) -> impl Future<Output = Result<RoutesResponse, ProviderError>> + Send;
}
