use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

/// Anything that keeps the routing provider from handing back a usable route
/// for one pair of stops.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("routing provider API key is not configured")]
    MissingApiKey,
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("routing provider responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("routing provider returned no routes")]
    NoRoutes,
    #[error("route has no legs")]
    MissingLegs,
}
