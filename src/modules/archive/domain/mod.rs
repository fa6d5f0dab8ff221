pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::*;
pub use repositories::{ArchiveRepository, DurableStore};
pub use services::{ResultSelector, Selection};
pub use value_objects::SearchRequest;
