use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    modules::archive::{
        domain::entities::{FetchResult, YearsIndex},
        infrastructure::cache::{ArchiveCache, CacheKey},
        traits::AudioFetcher,
    },
    shared::errors::AppResult,
};

/// Read-through, write-through caching around any `AudioFetcher`.
///
/// Concurrent misses on the same key are not coalesced: each one reaches the
/// inner fetcher and the last write wins.
pub struct CachingFetcherDecorator {
    inner: Arc<dyn AudioFetcher>,
    cache: Arc<ArchiveCache>,
}

impl CachingFetcherDecorator {
    pub fn new(inner: Arc<dyn AudioFetcher>, cache: Arc<ArchiveCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<ArchiveCache> {
        &self.cache
    }
}

#[async_trait]
impl AudioFetcher for CachingFetcherDecorator {
    async fn fetch_by_year(&self, year: i32, title_hint: Option<&str>) -> FetchResult {
        let key = CacheKey::by_year(year, title_hint);
        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let result = self.inner.fetch_by_year(year, title_hint).await;
        self.cache.put(&key, &result).await;
        result
    }

    async fn fetch_by_id(&self, identifier: &str) -> FetchResult {
        let key = CacheKey::by_id(identifier);
        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let result = self.inner.fetch_by_id(identifier).await;
        self.cache.put(&key, &result).await;
        result
    }

    /// Errors are passed through uncached so the next call rebuilds
    async fn fetch_years(&self) -> AppResult<Vec<i32>> {
        if let Some(index) = self.cache.get_years().await {
            return Ok(index.years);
        }

        let index = YearsIndex::built_now(self.inner.fetch_years().await?);
        self.cache.put_years(&index).await;
        Ok(index.years)
    }
}
