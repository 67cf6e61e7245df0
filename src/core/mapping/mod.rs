//! Journal mapping pipeline

pub mod pipeline;

pub use pipeline::{JournalMapper, ReferenceData};
