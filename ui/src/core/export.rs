//! CSV serialization of the history log.
//!
//! Fields are written verbatim: no quoting or escaping is applied, so timestamps
//! containing commas would corrupt the row layout. The service never emits them.

use super::model::HistoryRecord;

pub const CSV_FILENAME: &str = "segment_history.csv";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
pub const CSV_HEADER: [&str; 4] = ["timestamp", "total_a", "total_b", "overlap"];

/// A ready-to-deliver CSV payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub mime: &'static str,
    pub body: String,
}

impl CsvExport {
    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_bytes()
    }
}

/// Serialize `history`, or `None` when there is nothing to export.
pub fn build_csv(history: &[HistoryRecord]) -> Option<CsvExport> {
    if history.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(history.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for record in history {
        lines.push(format!(
            "{},{},{},{}",
            record.timestamp, record.total_a, record.total_b, record.overlap
        ));
    }

    Some(CsvExport {
        filename: CSV_FILENAME,
        mime: CSV_MIME,
        body: lines.join("\n"),
    })
}
