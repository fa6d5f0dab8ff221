pub mod modules;
pub mod shared;

pub use modules::archive::{
    ArchiveCache, AudioFetcher, AudioResponse, Direction, FetchFailure, FetchResult, RadioService,
    Recording, SiblingCursor, YearsResponse,
};
pub use shared::{ArchiveConfig, AppError, AppResult, SelectionMode};
