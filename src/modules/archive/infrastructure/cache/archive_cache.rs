use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::modules::archive::domain::{
    entities::{FetchResult, YearsIndex},
    repositories::DurableStore,
};

pub const AUDIO_KEY_PREFIX: &str = "audioCache-";
pub const AUDIO_ID_KEY_PREFIX: &str = "audioIdCache-";
pub const YEARS_KEY: &str = "availableYears";
pub const YEARS_TIMESTAMP_KEY: &str = "availableYearsTimestamp";

/// What a cached lookup was for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ByYear {
        year: i32,
        title_hint: Option<String>,
    },
    ById(String),
}

impl CacheKey {
    pub fn by_year(year: i32, title_hint: Option<&str>) -> Self {
        CacheKey::ByYear {
            year,
            title_hint: title_hint
                .map(str::trim)
                .filter(|hint| !hint.is_empty())
                .map(str::to_string),
        }
    }

    pub fn by_id(identifier: &str) -> Self {
        CacheKey::ById(identifier.trim().to_string())
    }

    /// `"<year>-<hint-or-empty>"` for year lookups, the raw identifier otherwise
    pub fn composite(&self) -> String {
        match self {
            CacheKey::ByYear { year, title_hint } => {
                format!("{}-{}", year, title_hint.as_deref().unwrap_or(""))
            }
            CacheKey::ById(identifier) => identifier.clone(),
        }
    }

    /// Key under which the entry is persisted
    pub fn storage_key(&self) -> String {
        match self {
            CacheKey::ByYear { .. } => format!("{}{}", AUDIO_KEY_PREFIX, self.composite()),
            CacheKey::ById(_) => format!("{}{}", AUDIO_ID_KEY_PREFIX, self.composite()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries held in the in-process tier
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Two-tier cache for lookup results and the years index.
///
/// The in-process tier is authoritative for the lifetime of the process.
/// The durable tier is best effort: read and write failures are logged and
/// treated as misses.
pub struct ArchiveCache {
    memory: DashMap<String, FetchResult>,
    years: RwLock<Option<YearsIndex>>,
    durable: Option<Arc<dyn DurableStore>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ArchiveCache {
    pub fn new(durable: Arc<dyn DurableStore>) -> Self {
        Self::build(Some(durable))
    }

    /// Cache without a durable tier
    pub fn in_memory_only() -> Self {
        Self::build(None)
    }

    fn build(durable: Option<Arc<dyn DurableStore>>) -> Self {
        Self {
            memory: DashMap::new(),
            years: RwLock::new(None),
            durable,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Memory first, then the durable tier (promoting what it finds)
    pub async fn get(&self, key: &CacheKey) -> Option<FetchResult> {
        let storage_key = key.storage_key();

        if let Some(entry) = self.memory.get(&storage_key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache hit (memory) for key: {}", storage_key);
            return Some(entry.value().clone());
        }

        if let Some(result) = self.read_durable::<FetchResult>(&storage_key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache hit (durable) for key: {}", storage_key);
            self.memory.insert(storage_key, result.clone());
            return Some(result);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Cache miss for key: {}", storage_key);
        None
    }

    /// Write through both tiers. Failures are cached like successes.
    pub async fn put(&self, key: &CacheKey, result: &FetchResult) {
        let storage_key = key.storage_key();
        self.memory.insert(storage_key.clone(), result.clone());
        self.write_durable(&storage_key, result).await;
    }

    /// Years index, if one younger than the TTL is available
    pub async fn get_years(&self) -> Option<YearsIndex> {
        self.get_years_at(chrono::Utc::now().timestamp_millis()).await
    }

    pub async fn get_years_at(&self, now_millis: i64) -> Option<YearsIndex> {
        if let Some(index) = self.years.read().await.as_ref() {
            if !index.is_expired_at(now_millis) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache hit (memory) for key: {}", YEARS_KEY);
                return Some(index.clone());
            }
        }

        let years = self.read_durable::<Vec<i32>>(YEARS_KEY).await;
        let timestamp = self.read_durable::<i64>(YEARS_TIMESTAMP_KEY).await;

        match (years, timestamp) {
            (Some(years), Some(timestamp)) => {
                let index = YearsIndex::new(years, timestamp);
                if index.is_expired_at(now_millis) {
                    log::debug!("Cached years index from {} has expired", timestamp);
                } else {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    log::debug!("Cache hit (durable) for key: {}", YEARS_KEY);
                    *self.years.write().await = Some(index.clone());
                    return Some(index);
                }
            }
            _ => log::debug!("Cache miss for key: {}", YEARS_KEY),
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub async fn put_years(&self, index: &YearsIndex) {
        *self.years.write().await = Some(index.clone());
        self.write_durable(YEARS_KEY, &index.years).await;
        self.write_durable(YEARS_TIMESTAMP_KEY, &index.timestamp)
            .await;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.memory.len(),
        }
    }

    /// Drop the in-process tier; the durable tier is kept
    pub async fn clear_memory(&self) {
        let dropped = self.memory.len();
        self.memory.clear();
        *self.years.write().await = None;
        log::info!("Cleared {} in-memory cache entries", dropped);
    }

    async fn read_durable<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let store = self.durable.as_ref()?;

        let raw = match store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Cache read failed for key {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unparsable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn write_durable<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(store) = self.durable.as_ref() else {
            return;
        };

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = store.set(key, &raw).await {
            log::warn!("Cache write failed for key {}: {}", key, e);
        }
    }
}
