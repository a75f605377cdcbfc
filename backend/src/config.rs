use std::net::SocketAddr;

use clap::Parser;

use crate::google_routes::DEFAULT_ENDPOINT;

/// Trip route service
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Number of provider responses kept in memory (0 disables the cache)
    #[arg(long, env = "SEGMENT_CACHE_SIZE", default_value_t = 256)]
    pub segment_cache_size: usize,

    /// Seconds a cached "depart now" response stays valid
    #[arg(long, env = "SEGMENT_CACHE_LIVE_TTL_SECS", default_value_t = 300)]
    pub segment_cache_live_ttl_secs: u64,

    #[command(flatten)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ProviderConfig {
    /// Routes API endpoint
    #[arg(long = "routes-api-url", env = "ROUTES_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Routes API key. Without it every segment is estimated.
    #[arg(long = "routes-api-key", env = "ROUTES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language for provider responses, e.g. "ko"
    #[arg(long, env = "ROUTES_LANGUAGE_CODE")]
    pub language_code: Option<String>,

    /// Per-request timeout for provider calls
    #[arg(long, env = "ROUTES_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}
