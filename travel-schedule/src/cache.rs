//! Caching layer for schedule search responses.
//!
//! Users flip between the results and filter screens, re-running the same
//! search each time. Caching the raw response for a short TTL keyed by the
//! full query avoids re-fetching; filters are applied client-side after the
//! cache, except the transfer preference, which is part of the key.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::rasp::{
    CarrierResponse, RaspError, ScheduleSource, SearchQuery, SegmentsResponse, StationsList,
};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// Schedule source with cached searches.
///
/// Directory and carrier lookups pass straight through.
pub struct CachedScheduleClient<S> {
    inner: S,
    searches: MokaCache<SearchQuery, Arc<SegmentsResponse>>,
}

impl<S: ScheduleSource> CachedScheduleClient<S> {
    /// Create a new cached client.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, searches }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.searches.invalidate_all();
    }
}

impl<S: ScheduleSource> ScheduleSource for CachedScheduleClient<S> {
    async fn search(&self, query: &SearchQuery) -> Result<Arc<SegmentsResponse>, RaspError> {
        if let Some(cached) = self.searches.get(query).await {
            debug!(from = %query.from, to = %query.to, "search cache hit");
            return Ok(cached);
        }

        let response = self.inner.search(query).await?;
        self.searches.insert(query.clone(), response.clone()).await;

        Ok(response)
    }

    async fn stations_list(&self) -> Result<StationsList, RaspError> {
        self.inner.stations_list().await
    }

    async fn carrier(&self, code: i64) -> Result<CarrierResponse, RaspError> {
        self.inner.carrier(code).await
    }
}
