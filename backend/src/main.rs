use std::{error::Error, time::Duration};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_router::{
    AppState, aggregator::RouteAggregator, cache::CachedProvider, config::AppConfig,
    create_router, google_routes::GoogleRoutesProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_router=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::parse();

    let google = GoogleRoutesProvider::new(&config.provider)?;
    if !google.has_api_key() {
        tracing::warn!("ROUTES_API_KEY not set; every segment will be a straight-line estimate");
    }
    tracing::info!(
        "routing provider {} (segment cache: {} entries, depart-now TTL {}s)",
        config.provider.endpoint,
        config.segment_cache_size,
        config.segment_cache_live_ttl_secs
    );

    let provider = CachedProvider::new(google, config.segment_cache_size)
        .with_live_ttl(Duration::from_secs(config.segment_cache_live_ttl_secs));
    let state = AppState::new(RouteAggregator::new(provider));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("starting trip router on http://{}", config.bind);
    tracing::info!("  POST /api/trip/route - Segment-by-segment trip route");
    tracing::info!("  GET /api/health - Liveness check");
    axum::serve(listener, app).await?;

    Ok(())
}
