use async_trait::async_trait;

use crate::{modules::archive::domain::entities::FetchResult, shared::errors::AppResult};

/// The lookups the radio dial needs. Audio lookups report every outcome,
/// failures included, as a `FetchResult`.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Audio for a year, optionally narrowed by a percent-encoded title hint
    async fn fetch_by_year(&self, year: i32, title_hint: Option<&str>) -> FetchResult;

    /// Audio for an item locator, bare UID or item slug
    async fn fetch_by_id(&self, identifier: &str) -> FetchResult;

    /// Years that have audio, ascending
    async fn fetch_years(&self) -> AppResult<Vec<i32>>;
}
