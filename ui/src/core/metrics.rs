//! Derived display metrics for the snapshot and the history log.
//!
//! Two percentage definitions coexist: the snapshot's `percent_overlap` is taken
//! verbatim from the service, while the trend series is computed here as
//! overlap over union per record.

use super::model::{HistoryRecord, Snapshot};

/// Category labels of the bar-chart breakdown, in render order.
pub const BREAKDOWN_LABELS: [&str; 3] = ["Dataset A", "Dataset B", "Overlap"];

/// One point of the overlap trend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    /// Whole percentage in `0..=100`.
    pub value: u8,
}

pub type DerivedSeries = Vec<SeriesPoint>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapBreakdown {
    pub labels: [&'static str; 3],
    pub counts: [u64; 3],
}

impl OverlapBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.labels.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// `round(100 * overlap / (total_a + total_b - overlap))`.
///
/// An empty union yields 0. Records breaking the count invariants saturate and
/// clamp instead of failing.
pub fn overlap_percent(record: &HistoryRecord) -> u8 {
    let union = record
        .total_a
        .saturating_add(record.total_b)
        .saturating_sub(record.overlap);
    if union == 0 {
        return 0;
    }
    let ratio = record.overlap as f64 / union as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Time-of-day portion of a timestamp, used as a compact axis label.
pub fn time_label(timestamp: &str) -> String {
    let trimmed = timestamp.trim();
    let time_part = trimmed
        .split_once(' ')
        .or_else(|| trimmed.split_once('T'))
        .map(|(_, rest)| rest.split(' ').next().unwrap_or(rest));

    match time_part {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => trimmed.to_string(),
    }
}

pub fn derive_series(history: &[HistoryRecord]) -> DerivedSeries {
    history
        .iter()
        .map(|record| SeriesPoint {
            label: time_label(&record.timestamp),
            value: overlap_percent(record),
        })
        .collect()
}

pub fn breakdown(snapshot: &Snapshot) -> OverlapBreakdown {
    OverlapBreakdown {
        labels: BREAKDOWN_LABELS,
        counts: [snapshot.total_a, snapshot.total_b, snapshot.overlap_count],
    }
}
