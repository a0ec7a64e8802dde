//! Dashboard cards built on top of the sync engine.

mod summary;
pub use summary::SegmentSummary;

mod status;
pub use status::{SyncFailure, SyncNotice};

mod charts;
pub use charts::{OverlapBarChart, OverlapTrendChart};

mod export;
pub use export::SegmentExport;

mod explainer;
pub use explainer::OverlapExplainer;
