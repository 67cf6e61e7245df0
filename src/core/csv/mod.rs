//! CSV output

pub mod chunker;
pub mod writer;

pub use chunker::split_csv_content;
pub use writer::mapped_journals_to_csv;
