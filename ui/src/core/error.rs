//! Failure taxonomy for talking to the remote segment service.

use thiserror::Error;

/// Everything that can go wrong while synchronizing with the segment service.
///
/// Payloads are plain strings so the error can be cloned into UI state and
/// compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Transport failure or a non-success status on a fetch.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    /// The body did not decode into the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The service answered the refresh trigger with a non-success status.
    #[error("Refresh rejected: {0}")]
    RefreshRejected(String),
}

impl SyncError {
    /// Short category label for status badges.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::NetworkFailure(_) => "Network",
            Self::MalformedResponse(_) => "Malformed response",
            Self::RefreshRejected(_) => "Refresh rejected",
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
