use async_trait::async_trait;

use crate::{
    modules::archive::{
        domain::{repositories::ArchiveRepository, value_objects::SearchRequest},
        infrastructure::http_client::RateLimitClient,
    },
    shared::{
        config::ArchiveConfig,
        errors::AppResult,
        utils::{LogContext, TimedOperation},
    },
};

use super::models::{ItemDetail, SearchResponse};

/// Library of Congress JSON API adapter
pub struct LocAdapter {
    http_client: RateLimitClient,
    base_url: String,
    format_filter: String,
}

impl LocAdapter {
    pub fn new(config: &ArchiveConfig) -> AppResult<Self> {
        Ok(Self::with_client(
            RateLimitClient::for_archive(config)?,
            config,
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, config: &ArchiveConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            format_filter: config.format_filter.clone(),
        }
    }

    /// `<base>/search/?q=<query>&fa=<filter>&fo=json`, without `q` for broad scans
    pub fn search_url(&self, request: &SearchRequest) -> String {
        let filter = urlencoding::encode(&self.format_filter);
        match request.query.as_deref() {
            Some(query) => format!(
                "{}/search/?q={}&fa={}&fo=json",
                self.base_url,
                urlencoding::encode(query),
                filter
            ),
            None => format!("{}/search/?fa={}&fo=json", self.base_url, filter),
        }
    }

    /// JSON endpoint for a canonical item URL
    pub fn item_url(locator: &str) -> String {
        let path = locator.split(['?', '#']).next().unwrap_or(locator);
        if path.ends_with('/') {
            format!("{}?fo=json", path)
        } else {
            format!("{}/?fo=json", path)
        }
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }
}

#[async_trait]
impl ArchiveRepository for LocAdapter {
    async fn search(&self, request: &SearchRequest) -> AppResult<SearchResponse> {
        let url = self.search_url(request);
        let label = request.query.as_deref().unwrap_or("<all years>");

        log::info!("LoC: Searching for '{}'", label);
        let timer = TimedOperation::new("LoC search");

        let response: SearchResponse = self.http_client.get(&url).await?;

        LogContext::api_call("LoC", &url, "ok", Some(timer.finish()));
        LogContext::search_operation(label, Some("LoC"), Some(response.results.len()));
        Ok(response)
    }

    async fn get_item(&self, locator: &str) -> AppResult<ItemDetail> {
        let url = Self::item_url(locator);

        log::info!("LoC: Getting item '{}'", locator);
        let timer = TimedOperation::new("LoC item");

        let detail: ItemDetail = self.http_client.get(&url).await?;

        LogContext::api_call("LoC", &url, "ok", Some(timer.finish()));
        log::debug!(
            "LoC: Item '{}' has {} resource(s)",
            locator,
            detail.resources.len()
        );
        Ok(detail)
    }
}
