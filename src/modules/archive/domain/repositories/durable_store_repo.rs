use async_trait::async_trait;

use crate::shared::errors::AppResult;

/// Best-effort persistent string key-value store backing the cache layer.
///
/// Callers treat every error as a cache miss; implementations only need
/// atomic single-key writes.
#[async_trait]
pub trait DurableStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}
