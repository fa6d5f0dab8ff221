pub mod dto;
pub mod fetcher;
pub mod service;

pub use dto::{AudioResponse, YearsResponse};
pub use fetcher::TwoStageFetcher;
pub use service::RadioService;
