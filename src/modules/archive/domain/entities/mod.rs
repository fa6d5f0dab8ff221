pub mod fetch_result;
pub mod recording;
pub mod sibling_cursor;
pub mod years_index;

pub use fetch_result::*;
pub use recording::{Recording, UNTITLED_RECORDING};
pub use sibling_cursor::{Direction, SiblingCursor};
pub use years_index::{YearsIndex, YEARS_INDEX_TTL_MILLIS};
