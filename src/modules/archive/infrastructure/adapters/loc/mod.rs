pub mod adapter;
pub mod field_mapping;
pub mod mapper;
pub mod models;

pub use adapter::LocAdapter;
pub use mapper::{LocMapper, NormalizeContext};
