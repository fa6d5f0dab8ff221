pub mod search_request;

pub use search_request::SearchRequest;
