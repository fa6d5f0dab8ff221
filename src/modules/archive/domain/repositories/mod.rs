mod archive_repo;
mod durable_store_repo;

pub use archive_repo::*;
pub use durable_store_repo::*;
