pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access
pub use application::{AudioResponse, RadioService, TwoStageFetcher, YearsResponse};
pub use domain::{Direction, FetchFailure, FetchResult, Recording, SiblingCursor, YearsIndex};
pub use infrastructure::{ArchiveCache, CacheKey, CacheStats, FileStore, LocAdapter, MemoryStore};
pub use traits::AudioFetcher;
