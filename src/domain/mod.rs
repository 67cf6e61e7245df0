//! Core domain types and models
//!
//! This module contains the typed models the rest of the crate works with:
//! parsed journal entries, master-data reference records, the normalized
//! output shape, batch failure records, and the crate error hierarchy.

pub mod errors;
pub mod failure;
pub mod journal;
pub mod mapped;
pub mod reference;
pub mod result;

pub use errors::{AbacusError, WorkdayError};
pub use failure::FailedJournal;
pub use journal::{JournalEntry, JournalEntryLine, WorktagsReference};
pub use mapped::{MappedEntryJournal, MappedJournal};
pub use result::Result;
