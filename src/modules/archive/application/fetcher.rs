use async_trait::async_trait;
use std::borrow::Cow;
use std::sync::Arc;

use crate::{
    modules::archive::{
        domain::{
            entities::{
                FetchFailure, FetchResult, ITEM_FETCH_ERROR_MESSAGE, YEAR_FETCH_ERROR_MESSAGE,
            },
            repositories::ArchiveRepository,
            services::{build_years_index, canonical_item_url, extract_audio_url, ResultSelector},
            value_objects::SearchRequest,
        },
        infrastructure::adapters::loc::{
            models::{ItemDetail, SearchItem},
            LocMapper, NormalizeContext,
        },
        traits::AudioFetcher,
    },
    shared::{
        errors::AppResult,
        utils::{LogContext, TimedOperation},
    },
};

/// Search, select, fetch detail, extract audio, normalize.
///
/// Every outcome is returned as a `FetchResult`; transport and parse errors
/// become `FetchFailure::FetchError` with a listener-facing message.
pub struct TwoStageFetcher {
    repository: Arc<dyn ArchiveRepository>,
    selector: ResultSelector,
    base_url: String,
}

impl TwoStageFetcher {
    pub fn new(
        repository: Arc<dyn ArchiveRepository>,
        selector: ResultSelector,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            selector,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn lookup_year(
        &self,
        year: i32,
        title_hint: Option<&str>,
    ) -> Result<FetchResult, FetchFailure> {
        let request = SearchRequest::for_year(year, title_hint);
        let response = self.repository.search(&request).await.map_err(|e| {
            LogContext::error_with_context(&e, &format!("searching audio for {}", year));
            FetchFailure::FetchError(YEAR_FETCH_ERROR_MESSAGE.to_string())
        })?;

        let selection = self.selector.select(&response.results, title_hint)?;
        let item = selection.item;

        let Some(raw_locator) = item.id.as_deref().or(item.url.as_deref()) else {
            log::warn!("Fetcher: selected item for {} has neither id nor url", year);
            return Err(FetchFailure::NoAudioUrlAvailable);
        };
        let locator = canonical_item_url(raw_locator, &self.base_url).map_err(|e| {
            LogContext::error_with_context(&e, "resolving selected item");
            FetchFailure::NoAudioUrlAvailable
        })?;

        let detail = self.repository.get_item(&locator).await.map_err(|e| {
            LogContext::error_with_context(&e, &format!("fetching item {}", locator));
            FetchFailure::FetchError(YEAR_FETCH_ERROR_MESSAGE.to_string())
        })?;

        let audio_url = extract_audio_url(&detail.resources)
            .or_else(|| extract_audio_url(&item.resources))
            .ok_or(FetchFailure::NoAudioUrlAvailable)?;

        Ok(Self::assemble(
            &detail,
            Some(item),
            NormalizeContext {
                requested_year: Some(year),
                locator: &locator,
            },
            audio_url,
            Some(selection.item_uids),
        ))
    }

    async fn lookup_id(&self, identifier: &str) -> Result<FetchResult, FetchFailure> {
        let locator = canonical_item_url(identifier, &self.base_url).map_err(|e| {
            LogContext::error_with_context(&e, "resolving item identifier");
            FetchFailure::FetchError(ITEM_FETCH_ERROR_MESSAGE.to_string())
        })?;

        let detail = self.repository.get_item(&locator).await.map_err(|e| {
            LogContext::error_with_context(&e, &format!("fetching item {}", locator));
            FetchFailure::FetchError(ITEM_FETCH_ERROR_MESSAGE.to_string())
        })?;

        let audio_url =
            extract_audio_url(&detail.resources).ok_or(FetchFailure::NoAudioUrlAvailable)?;

        Ok(Self::assemble(
            &detail,
            None,
            NormalizeContext {
                requested_year: None,
                locator: &locator,
            },
            audio_url,
            None,
        ))
    }

    /// Normalize and build the success arm. Without a sibling list the
    /// recording's own UID (if any) stands in.
    fn assemble(
        detail: &ItemDetail,
        search: Option<&SearchItem>,
        context: NormalizeContext<'_>,
        audio_url: String,
        item_uids: Option<Vec<String>>,
    ) -> FetchResult {
        let recording = LocMapper::map_to_recording(detail, search, &context);

        let token_source = recording
            .uid
            .as_deref()
            .or_else(|| search.and_then(|s| s.id.as_deref()))
            .or(detail.id.as_deref())
            .unwrap_or(context.locator);
        let title_token = urlencoding::encode(token_source).into_owned();

        let item_uids = item_uids.unwrap_or_else(|| recording.uid.iter().cloned().collect());

        FetchResult::Success {
            audio_url,
            recording,
            title_token,
            item_uids,
        }
    }
}

/// Title hints arrive form-encoded from URL state; fall back to the raw text
/// when they are not valid percent-encoding.
pub fn decode_title_hint(hint: &str) -> Cow<'_, str> {
    let spaced = hint.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(hint),
    }
}

#[async_trait]
impl AudioFetcher for TwoStageFetcher {
    async fn fetch_by_year(&self, year: i32, title_hint: Option<&str>) -> FetchResult {
        let timer = TimedOperation::new(&format!("fetch audio for {}", year));
        let decoded = title_hint.map(decode_title_hint);

        let result = self
            .lookup_year(year, decoded.as_deref())
            .await
            .unwrap_or_else(FetchResult::failure);

        match &result {
            FetchResult::Success { recording, .. } => {
                log::info!("Fetcher: {} -> '{}'", year, recording.title)
            }
            FetchResult::Failure { reason } => log::info!("Fetcher: {} -> {}", year, reason),
        }
        timer.finish();
        result
    }

    async fn fetch_by_id(&self, identifier: &str) -> FetchResult {
        let timer = TimedOperation::new(&format!("fetch audio for item {}", identifier));

        let result = self
            .lookup_id(identifier)
            .await
            .unwrap_or_else(FetchResult::failure);

        match &result {
            FetchResult::Success { recording, .. } => {
                log::info!("Fetcher: item {} -> '{}'", identifier, recording.title)
            }
            FetchResult::Failure { reason } => {
                log::info!("Fetcher: item {} -> {}", identifier, reason)
            }
        }
        timer.finish();
        result
    }

    async fn fetch_years(&self) -> AppResult<Vec<i32>> {
        let timer = TimedOperation::new("build years index");
        let response = self.repository.search(&SearchRequest::broad()).await?;
        let years = build_years_index(&response.results);
        timer.finish_with_info(&format!("{} years", years.len()));
        Ok(years)
    }
}
