mod archive_cache;

pub use archive_cache::{
    ArchiveCache, CacheKey, CacheStats, AUDIO_ID_KEY_PREFIX, AUDIO_KEY_PREFIX, YEARS_KEY,
    YEARS_TIMESTAMP_KEY,
};
