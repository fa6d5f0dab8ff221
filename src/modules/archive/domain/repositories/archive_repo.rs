use async_trait::async_trait;

use crate::{
    modules::archive::{
        domain::value_objects::SearchRequest,
        infrastructure::adapters::loc::models::{ItemDetail, SearchResponse},
    },
    shared::errors::AppResult,
};

/// Repository interface for the remote archive
/// Both endpoints return untrusted, partially populated records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Run a search restricted to the configured format filter
    async fn search(&self, request: &SearchRequest) -> AppResult<SearchResponse>;

    /// Fetch the full record for a canonical item URL
    async fn get_item(&self, locator: &str) -> AppResult<ItemDetail>;
}
