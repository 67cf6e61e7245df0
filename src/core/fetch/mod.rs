//! Generic paginated fetch engine

pub mod adapter;
pub mod engine;
pub mod pagination;

pub use adapter::{EngineConfig, FetchCriteria, RecordAdapter};
pub use engine::FetchEngine;
pub use pagination::ResponseResults;
