//! Contract with the remote segment service and its HTTP implementation.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::join_url;
use super::error::SyncError;
use super::model::{HistoryRecord, Snapshot};

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(90);

/// The three calls the dashboard makes against the segment service.
///
/// Futures are not required to be `Send`: the sync controller drives them on a
/// single cooperative executor.
pub trait SegmentService {
    /// `GET /segment`
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, SyncError>>;
    /// `GET /history`
    fn fetch_history(&self) -> impl Future<Output = Result<Vec<HistoryRecord>, SyncError>>;
    /// `POST /refresh`. Only the status matters.
    fn trigger_refresh(&self) -> impl Future<Output = Result<(), SyncError>>;
}

#[derive(Debug, Clone)]
pub struct HttpSegmentService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSegmentService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(REQUEST_TIMEOUT);
        let client = builder
            .build()
            .map_err(|err| SyncError::NetworkFailure(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let url = join_url(&self.base_url, path);
        debug!(%url, "fetching");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| SyncError::NetworkFailure(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::NetworkFailure(format!("HTTP {status} from {path}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SyncError::NetworkFailure(err.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl SegmentService for HttpSegmentService {
    async fn fetch_snapshot(&self) -> Result<Snapshot, SyncError> {
        self.get_json("/segment").await
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, SyncError> {
        self.get_json("/history").await
    }

    async fn trigger_refresh(&self) -> Result<(), SyncError> {
        let url = join_url(&self.base_url, "/refresh");
        debug!(%url, "triggering refresh");
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|err| SyncError::NetworkFailure(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SyncError::RefreshRejected(format!("HTTP {status}")))
        }
    }
}
