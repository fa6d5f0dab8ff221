/// Test doubles for the archive and the durable store
use async_trait::async_trait;
use radiodial_lib::modules::archive::{
    domain::{repositories::ArchiveRepository, value_objects::SearchRequest, DurableStore},
    infrastructure::adapters::loc::models::{ItemDetail, SearchResponse},
};
use radiodial_lib::shared::errors::{AppError, AppResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory archive serving canned JSON, counting every call
#[derive(Default)]
pub struct FakeArchive {
    /// Keyed by query; `None` is the broad scan
    searches: HashMap<Option<String>, Value>,
    /// Keyed by canonical item URL
    items: HashMap<String, Value>,
    failing: bool,
    search_calls: AtomicUsize,
    item_calls: AtomicUsize,
    requested_items: Mutex<Vec<String>>,
}

impl FakeArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as the transport would
    pub fn unreachable() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, query: Option<&str>, page: Value) -> Self {
        self.searches.insert(query.map(str::to_string), page);
        self
    }

    pub fn with_item(mut self, locator: &str, detail: Value) -> Self {
        self.items.insert(locator.to_string(), detail);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.search_calls() + self.item_calls()
    }

    pub fn requested_items(&self) -> Vec<String> {
        self.requested_items.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveRepository for FakeArchive {
    async fn search(&self, request: &SearchRequest) -> AppResult<SearchResponse> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(AppError::ApiError("LoC API request failed: connection refused".into()));
        }
        let page = self
            .searches
            .get(&request.query)
            .cloned()
            .unwrap_or_else(|| serde_json::json!({"results": []}));
        Ok(serde_json::from_value(page)?)
    }

    async fn get_item(&self, locator: &str) -> AppResult<ItemDetail> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_items.lock().unwrap().push(locator.to_string());
        if self.failing {
            return Err(AppError::ApiError("LoC API request failed: connection refused".into()));
        }
        match self.items.get(locator) {
            Some(detail) => Ok(serde_json::from_value(detail.clone())?),
            None => Err(AppError::NotFound("LoC API has no such resource".into())),
        }
    }
}

/// Durable store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl DurableStore for FailingStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::CacheError("disk unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::CacheError("disk full".into()))
    }
}
