pub mod adapters;
pub mod cache;
pub mod decorators;
pub mod http_client;
pub mod persistence;

pub use adapters::LocAdapter;
pub use cache::{ArchiveCache, CacheKey, CacheStats};
pub use decorators::CachingFetcherDecorator;
pub use http_client::RateLimitClient;
pub use persistence::{FileStore, MemoryStore};
