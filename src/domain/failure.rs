//! Batch failure records
//!
//! Any single-record parse or mapping failure is converted into a
//! [`FailedJournal`] and appended to the batch's failure list instead of
//! aborting the batch. Records are immutable once created and the list is
//! append-only for the lifetime of a batch.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Immutable record of one failed journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedJournal {
    /// Business id of the failing record, when one was extractable
    pub journal_id: Option<String>,

    /// The underlying error, verbatim
    pub error_message: String,

    /// Human-readable context: which stage failed and on which page
    pub reason: String,

    /// RFC3339 timestamp of when the failure was recorded
    pub timestamp: String,

    /// Raw payload snapshot of the failing node, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl FailedJournal {
    /// Creates a failure record stamped with the current time
    pub fn new(
        journal_id: Option<String>,
        error_message: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            journal_id,
            error_message: error_message.into(),
            reason: reason.into(),
            timestamp: Utc::now().to_rfc3339(),
            data: None,
        }
    }

    /// Attaches a raw payload snapshot
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}
