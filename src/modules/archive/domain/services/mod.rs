pub mod audio_extractor;
pub mod identifier_extractor;
pub mod item_locator;
pub mod link_normalizer;
pub mod result_selector;
pub mod years_index_builder;

pub use audio_extractor::{extract_audio_url, has_playable_audio, is_audio_url};
pub use identifier_extractor::extract_uid;
pub use item_locator::canonical_item_url;
pub use link_normalizer::normalize_links;
pub use result_selector::{ResultSelector, Selection};
pub use years_index_builder::build_years_index;
