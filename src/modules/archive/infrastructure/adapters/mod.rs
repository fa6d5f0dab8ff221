pub mod loc;

pub use loc::{LocAdapter, LocMapper, NormalizeContext};
