//! Business logic
//!
//! The generic fetch engine, the journal mapping pipeline, CSV rendering
//! and chunking, and the export coordinator tying a batch together.

pub mod csv;
pub mod export;
pub mod fetch;
pub mod mapping;
