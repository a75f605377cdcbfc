use std::{
    num::NonZeroUsize,
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use lru::LruCache;

use crate::{
    error::ProviderError,
    provider::{RouteProvider, RouteQuery, TravelMode},
    wire::RoutesResponse,
};

/// How long a "depart now" answer stays usable. Transit schedules move on, so
/// only queries with an explicit departure time are kept until evicted.
pub const LIVE_DEPARTURE_TTL: Duration = Duration::from_secs(300);

/// Memoizes successful provider responses. A query with a fixed departure time
/// always yields the same answer and is kept until the LRU evicts it. A query
/// without one means "leave now" and expires after the live TTL.
/// Failures are never stored: the next request for that pair tries again.
pub struct CachedProvider<P> {
    inner: P,
    live_ttl: Duration,
    cache: Option<Mutex<LruCache<QueryKey, CachedResponse>>>,
}

/// Coordinates are keyed by their exact bit pattern, so two stops that differ
/// anywhere in the mantissa never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    mode: TravelMode,
    origin: (u64, u64),
    destination: (u64, u64),
    departure_time: Option<DateTime<Utc>>,
}

impl From<&RouteQuery> for QueryKey {
    fn from(query: &RouteQuery) -> Self {
        Self {
            mode: query.mode,
            origin: (query.origin.lat.to_bits(), query.origin.lon.to_bits()),
            destination: (query.destination.lat.to_bits(), query.destination.lon.to_bits()),
            departure_time: query.departure_time,
        }
    }
}

struct CachedResponse {
    stored_at: Instant,
    response: RoutesResponse,
}

impl<P> CachedProvider<P> {
    /// `capacity == 0` turns the cache off.
    pub fn new(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            live_ttl: LIVE_DEPARTURE_TTL,
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Override [`LIVE_DEPARTURE_TTL`] for queries without a departure time.
    pub fn with_live_ttl(mut self, ttl: Duration) -> Self {
        self.live_ttl = ttl;
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &QueryKey) -> Option<RoutesResponse> {
        let mut cache = self.cache.as_ref()?.lock().ok()?;
        let entry = cache.get(key)?;
        if key.departure_time.is_some() || entry.stored_at.elapsed() < self.live_ttl {
            return Some(entry.response.clone());
        }
        cache.pop(key);
        None
    }

    fn store(&self, key: QueryKey, response: &RoutesResponse) {
        if let Some(Ok(mut cache)) = self.cache.as_ref().map(Mutex::lock) {
            cache.put(
                key,
                CachedResponse {
                    stored_at: Instant::now(),
                    response: response.clone(),
                },
            );
        }
    }
}

impl<P: RouteProvider> RouteProvider for CachedProvider<P> {
    async fn compute_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ProviderError> {
        if self.cache.is_none() {
            return self.inner.compute_routes(query).await;
        }

        let key = QueryKey::from(query);
        if let Some(hit) = self.lookup(&key) {
            tracing::debug!(
                "segment cache hit for ({}, {}) -> ({}, {})",
                query.origin.lat,
                query.origin.lon,
                query.destination.lat,
                query.destination.lon
            );
            return Ok(hit);
        }

        let response = self.inner.compute_routes(query).await?;
        self.store(key, &response);
        Ok(response)
    }
}
