//! Export batch summary

use crate::domain::FailedJournal;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one export batch
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Journals successfully fetched and mapped
    pub journals_fetched: usize,

    /// Normalized entry rows written (one per journal line)
    pub entries_written: usize,

    /// Record count reported by the pagination envelope
    pub total_reported: u64,

    /// Whether every reported record was accumulated
    pub complete: bool,

    /// CSV chunks produced, in order; each chunk is a standalone CSV text
    pub chunks: Vec<String>,

    /// Files written (empty in dry-run mode)
    pub output_files: Vec<PathBuf>,

    /// Per-record failures accumulated over the batch, append-only
    pub failures: Vec<FailedJournal>,

    /// Wall-clock duration of the batch
    pub duration: Duration,
}

impl ExportSummary {
    /// Record the elapsed time of the batch
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether any record-level failure was recorded
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults() {
        let summary = ExportSummary::default();
        assert_eq!(summary.journals_fetched, 0);
        assert!(summary.chunks.is_empty());
        assert!(!summary.has_failures());
        assert!(!summary.complete);
    }

    #[test]
    fn test_with_duration() {
        let summary = ExportSummary::default().with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }
}
