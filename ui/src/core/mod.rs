//! Framework-agnostic engine: data model, remote service contract, sync lifecycle,
//! derived metrics and CSV export. Nothing in here depends on Dioxus.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod metrics;
pub mod model;
pub mod service;
pub mod sync;

pub use config::{DashboardConfig, FeatureFlags, Palette, Theme};
pub use error::SyncError;
pub use model::{HistoryRecord, SegmentData, Snapshot, SyncState, SyncStatus};
pub use service::{HttpSegmentService, SegmentService};
pub use sync::{SyncController, SyncOutcome};
