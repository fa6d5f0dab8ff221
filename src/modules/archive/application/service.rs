use futures::future::OptionFuture;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    modules::archive::{
        application::{dto::YearsResponse, fetcher::TwoStageFetcher},
        domain::{
            entities::{Direction, FetchResult, Recording, SiblingCursor, YearsIndex},
            repositories::DurableStore,
            services::ResultSelector,
        },
        infrastructure::{ArchiveCache, CachingFetcherDecorator, FileStore, LocAdapter, MemoryStore},
        traits::AudioFetcher,
    },
    shared::{config::ArchiveConfig, errors::AppResult},
};

pub const YEARS_ERROR_MESSAGE: &str = "Error fetching available years.";

/// Entry point for the radio dial: cached year and item lookups, the years
/// index, prefetching and sibling navigation.
///
/// Public operations never fail; problems come back inside the returned
/// value.
#[derive(Clone)]
pub struct RadioService {
    fetcher: Arc<CachingFetcherDecorator>,
}

impl RadioService {
    /// Wrap `inner` with the given cache
    pub fn new(inner: Arc<dyn AudioFetcher>, cache: Arc<ArchiveCache>) -> Self {
        Self {
            fetcher: Arc::new(CachingFetcherDecorator::new(inner, cache)),
        }
    }

    /// Wire the LoC adapter, fetcher and cache from configuration
    pub async fn from_config(config: &ArchiveConfig) -> AppResult<Self> {
        let adapter = Arc::new(LocAdapter::new(config)?);
        let fetcher = TwoStageFetcher::new(
            adapter,
            ResultSelector::new(config.selection_mode),
            config.base_url.clone(),
        );

        let store: Arc<dyn DurableStore> = match &config.cache_dir {
            Some(dir) => Arc::new(FileStore::open(dir).await?),
            None => Arc::new(MemoryStore::new()),
        };

        log::info!(
            "Radio service ready (base: {}, selection: {:?}, cache dir: {:?})",
            config.base_url,
            config.selection_mode,
            config.cache_dir
        );
        Ok(Self::new(Arc::new(fetcher), Arc::new(ArchiveCache::new(store))))
    }

    pub fn cache(&self) -> &Arc<ArchiveCache> {
        self.fetcher.cache()
    }

    pub async fn fetch_available_years(&self) -> YearsResponse {
        match self.fetcher.fetch_years().await {
            Ok(years) => YearsResponse::years(years),
            Err(e) => {
                log::error!("Failed to build years index: {}", e);
                YearsResponse::error(YEARS_ERROR_MESSAGE)
            }
        }
    }

    /// Available years with `requested` merged in, so a year reached through
    /// a shared link still has a slot on the dial
    pub async fn fetch_available_years_including(&self, requested: i32) -> YearsResponse {
        let mut response = self.fetch_available_years().await;
        if response.error.is_none() {
            let years = std::mem::take(&mut response.years);
            response.years = YearsIndex::new(years, 0).with_year(requested).years;
        }
        response
    }

    pub async fn fetch_audio_by_year(&self, year: i32, title_hint: Option<&str>) -> FetchResult {
        self.fetcher.fetch_by_year(year, title_hint).await
    }

    pub async fn fetch_audio_by_id(&self, identifier: &str) -> FetchResult {
        self.fetcher.fetch_by_id(identifier).await
    }

    /// Open an item by identifier together with the dial's years. The
    /// recording's own year is merged in so the dial can show where the item
    /// sits even when the index has no entry for it.
    pub async fn fetch_item_with_years(&self, identifier: &str) -> (FetchResult, YearsResponse) {
        let result = self.fetch_audio_by_id(identifier).await;
        let years = match result.recording().and_then(Recording::year) {
            Some(year) => self.fetch_available_years_including(year).await,
            None => self.fetch_available_years().await,
        };
        (result, years)
    }

    /// Warm the cache for the indexed years either side of `year`.
    ///
    /// Runs in the background; await the handle only when completion matters.
    pub fn prefetch_adjacent(&self, year: i32, years: &[i32]) -> JoinHandle<()> {
        let (previous, next) = YearsIndex::new(years.to_vec(), 0).neighbours(year);
        let service = self.clone();

        tokio::spawn(async move {
            let warm = |target: Option<i32>| -> OptionFuture<_> {
                target
                    .map(|y| {
                        let service = service.clone();
                        async move {
                            log::debug!("Prefetching audio for {}", y);
                            service.fetch_audio_by_year(y, None).await;
                        }
                    })
                    .into()
            };
            futures::join!(warm(previous), warm(next));
        })
    }

    /// Fetch the sibling one step in `direction` and move the cursor onto it.
    /// `None` when the cursor is already at that end.
    pub async fn fetch_sibling(
        &self,
        cursor: &mut SiblingCursor,
        direction: Direction,
    ) -> Option<FetchResult> {
        let uid = cursor.advance(direction)?.to_string();
        Some(self.fetch_audio_by_id(&uid).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::archive::domain::entities::FetchFailure;
    use crate::shared::errors::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingFetcher {
        years_requested: Mutex<Vec<i32>>,
        ids_requested: Mutex<Vec<String>>,
        fail_years: bool,
    }

    #[async_trait]
    impl AudioFetcher for RecordingFetcher {
        async fn fetch_by_year(&self, year: i32, _title_hint: Option<&str>) -> FetchResult {
            self.years_requested.lock().unwrap().push(year);
            FetchResult::failure(FetchFailure::NoPlayableAudioFound)
        }

        async fn fetch_by_id(&self, identifier: &str) -> FetchResult {
            self.ids_requested.lock().unwrap().push(identifier.to_string());
            FetchResult::Success {
                audio_url: format!("https://tile.loc.gov/{}.mp3", identifier),
                recording: Recording {
                    uid: Some(identifier.to_string()),
                    date: format!("{}-05-01", identifier),
                    ..Default::default()
                },
                title_token: identifier.to_string(),
                item_uids: vec![identifier.to_string()],
            }
        }

        async fn fetch_years(&self) -> AppResult<Vec<i32>> {
            if self.fail_years {
                Err(AppError::ApiError("unreachable".to_string()))
            } else {
                Ok(vec![1920, 1940, 1960])
            }
        }
    }

    fn service(inner: Arc<RecordingFetcher>) -> RadioService {
        RadioService::new(inner, Arc::new(ArchiveCache::in_memory_only()))
    }

    #[tokio::test]
    async fn test_years_error_becomes_message() {
        let svc = service(Arc::new(RecordingFetcher {
            fail_years: true,
            ..Default::default()
        }));

        let response = svc.fetch_available_years().await;
        assert!(response.years.is_empty());
        assert_eq!(response.error.as_deref(), Some(YEARS_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_years_including_requested() {
        let svc = service(Arc::new(RecordingFetcher::default()));

        let response = svc.fetch_available_years_including(1935).await;
        assert_eq!(response.years, vec![1920, 1935, 1940, 1960]);

        let response = svc.fetch_available_years_including(1940).await;
        assert_eq!(response.years, vec![1920, 1940, 1960]);
    }

    #[tokio::test]
    async fn test_item_year_joins_the_dial() {
        let svc = service(Arc::new(RecordingFetcher::default()));

        let (result, years) = svc.fetch_item_with_years("1951").await;
        assert!(result.is_success());
        assert_eq!(years.years, vec![1920, 1940, 1951, 1960]);
    }

    #[tokio::test]
    async fn test_undated_item_keeps_plain_dial() {
        let svc = service(Arc::new(RecordingFetcher::default()));

        let (_, years) = svc.fetch_item_with_years("ihas.7").await;
        assert_eq!(years.years, vec![1920, 1940, 1960]);
    }

    #[tokio::test]
    async fn test_prefetch_adjacent_warms_neighbours() {
        let inner = Arc::new(RecordingFetcher::default());
        let svc = service(inner.clone());

        svc.prefetch_adjacent(1940, &[1920, 1940, 1960]).await.unwrap();

        let mut requested = inner.years_requested.lock().unwrap().clone();
        requested.sort_unstable();
        assert_eq!(requested, vec![1920, 1960]);

        // already cached
        svc.fetch_audio_by_year(1960, None).await;
        assert_eq!(inner.years_requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_prefetch_at_the_edge() {
        let inner = Arc::new(RecordingFetcher::default());
        let svc = service(inner.clone());

        svc.prefetch_adjacent(1920, &[1920, 1940]).await.unwrap();

        assert_eq!(*inner.years_requested.lock().unwrap(), vec![1940]);
    }

    #[tokio::test]
    async fn test_fetch_sibling_moves_cursor() {
        let inner = Arc::new(RecordingFetcher::default());
        let svc = service(inner.clone());
        let mut cursor = SiblingCursor::new(vec!["1".into(), "2".into()]);

        let result = svc.fetch_sibling(&mut cursor, Direction::Next).await.unwrap();
        assert_eq!(result.title_token(), Some("2"));
        assert_eq!(cursor.current(), Some("2"));

        assert!(svc.fetch_sibling(&mut cursor, Direction::Next).await.is_none());
        assert_eq!(*inner.ids_requested.lock().unwrap(), vec!["2"]);
    }
}
