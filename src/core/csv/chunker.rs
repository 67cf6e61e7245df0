//! CSV chunking
//!
//! Downstream ingestion caps the number of rows it accepts per upload, so
//! a rendered CSV document is split into an ordered sequence of bounded
//! chunks before handoff.

/// Split a header-plus-rows CSV text into chunks of at most `max_rows`
/// data rows
///
/// Row order is preserved and the final chunk may be short. With
/// `repeat_header` set, every chunk starts with the header line; without
/// it, chunks carry data rows only. An input with no data rows (header
/// only, or empty) yields no chunks.
pub fn split_csv_content(content: &str, max_rows: usize, repeat_header: bool) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut lines = trimmed.lines();
    let header = match lines.next() {
        Some(header) => header,
        None => return Vec::new(),
    };
    let rows: Vec<&str> = lines.collect();
    if rows.is_empty() {
        return Vec::new();
    }

    let max_rows = max_rows.max(1);
    rows.chunks(max_rows)
        .map(|chunk| {
            if repeat_header {
                let mut piece = String::from(header);
                for row in chunk {
                    piece.push('\n');
                    piece.push_str(row);
                }
                piece
            } else {
                chunk.join("\n")
            }
        })
        .collect()
}
