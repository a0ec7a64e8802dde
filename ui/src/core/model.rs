//! Records exchanged with the segment service and the state container the
//! sync controller publishes.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::SyncError;

/// Current overlap summary as computed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total_a: u64,
    pub total_b: u64,
    pub overlap_count: u64,
    /// Display-only; the client never recomputes it.
    pub percent_overlap: f64,
}

/// One historical overlap observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub total_a: u64,
    pub total_b: u64,
    pub overlap: u64,
}

/// A snapshot together with the history fetched in the same sync pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentData {
    pub snapshot: Snapshot,
    pub history: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Refreshing,
    Ready,
    Failed(SyncError),
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Refreshing => "Refreshing",
            Self::Ready => "Ready",
            Self::Failed(_) => "Failed",
        }
    }
}

/// Everything the presentation layer needs to render the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncState {
    pub status: SyncStatus,
    /// Last successfully loaded pair. Kept through a failed refresh.
    pub data: Option<SegmentData>,
    /// Non-fatal failure of the most recent refresh.
    pub notice: Option<SyncError>,
    pub last_synced: Option<OffsetDateTime>,
}

impl SyncState {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.data.as_ref().map(|data| &data.snapshot)
    }

    pub fn history(&self) -> &[HistoryRecord] {
        self.data
            .as_ref()
            .map(|data| data.history.as_slice())
            .unwrap_or(&[])
    }

    /// True while a load or refresh is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.status, SyncStatus::Loading | SyncStatus::Refreshing)
    }

    pub fn failure(&self) -> Option<&SyncError> {
        match &self.status {
            SyncStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}
