// Shared kernel: configuration, errors and cross-cutting utilities

pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod utils; // Logging helpers

pub use config::{ArchiveConfig, SelectionMode};
pub use errors::{AppError, AppResult};
