pub mod aggregator;
pub mod cache;
pub mod config;
pub mod error;
pub mod google_routes;
pub mod gpx_export;
pub mod models;
pub mod normalize;
pub mod polyline;
pub mod provider;
pub mod render;
pub mod routing;
pub mod wire;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::RouteAggregator;
use crate::error::RouteError;
use crate::gpx_export::encode_overlay_as_gpx;
use crate::models::{ApiError, TripRouteRequest, TripRouteResponse};
use crate::provider::RouteProvider;
use crate::render::render_trip;

pub struct AppState<P> {
    pub aggregator: Arc<RouteAggregator<P>>,
}

impl<P> AppState<P> {
    pub fn new(aggregator: RouteAggregator<P>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            aggregator: Arc::clone(&self.aggregator),
        }
    }
}

pub fn create_router<P: RouteProvider + 'static>(state: AppState<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trip/route", post(trip_route_handler::<P>))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn trip_route_handler<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    Json(req): Json<TripRouteRequest>,
) -> Result<Json<TripRouteResponse>, (StatusCode, Json<ApiError>)> {
    if let Some((index, stop)) = req
        .stops
        .iter()
        .enumerate()
        .find(|(_, stop)| !stop.location.is_valid())
    {
        return Err(bad_request(format!(
            "stop {} ({}) has invalid coordinates {:?}",
            index + 1,
            stop.id,
            stop.location
        )));
    }

    tracing::info!("Trip route request: {} stops", req.stops.len());

    let route = state
        .aggregator
        .compute_trip_route_departing(&req.stops, req.departure_time)
        .await;

    let (overlay, gpx_base64) = match &route {
        Some(route) => {
            let overlay = render_trip(&req.stops, route);
            let gpx = encode_overlay_as_gpx(&overlay).map_err(internal_error)?;
            (Some(overlay), Some(gpx))
        }
        None => (None, None),
    };

    Ok(Json(TripRouteResponse {
        route,
        overlay,
        gpx_base64,
        computed_at: Utc::now(),
    }))
}

async fn health_handler() -> &'static str {
    "ok"
}

fn bad_request(message: String) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { message }))
}

fn internal_error(err: RouteError) -> (StatusCode, Json<ApiError>) {
    tracing::error!("trip route failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
