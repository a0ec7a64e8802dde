//! Fetch lifecycle for the dashboard.
//!
//! The controller is the only writer of [`SyncState`]. It runs on a single
//! cooperative executor: state lives in a `RefCell` and is never borrowed
//! across an await point, so concurrent calls observe each other's status and
//! a second load or refresh is rejected instead of racing the first.

use std::cell::RefCell;

use futures_util::future;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::error::SyncError;
use super::model::{SegmentData, SyncState, SyncStatus};
use super::service::SegmentService;

/// Result of a load or refresh request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// New data was published.
    Applied,
    /// Another load or refresh was already in flight; nothing happened.
    Skipped,
}

type Observer = Box<dyn Fn(&SyncState)>;

pub struct SyncController<S> {
    service: S,
    state: RefCell<SyncState>,
    observer: Option<Observer>,
}

impl<S: SegmentService> SyncController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RefCell::new(SyncState::default()),
            observer: None,
        }
    }

    /// Called with the full state after every transition.
    pub fn with_observer(mut self, observer: impl Fn(&SyncState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Fetch snapshot and history together and publish them as one pair.
    ///
    /// Any failure is fatal: the state moves to `Failed` and holds no data.
    pub async fn load_initial(&self) -> Result<SyncOutcome, SyncError> {
        if self.is_busy() {
            debug!(status = self.state.borrow().status.label(), "load skipped");
            return Ok(SyncOutcome::Skipped);
        }

        self.transition(|state| {
            state.status = SyncStatus::Loading;
            state.notice = None;
        });

        match self.fetch_pair().await {
            Ok(data) => {
                self.publish(data);
                Ok(SyncOutcome::Applied)
            }
            Err(err) => {
                warn!(error = %err, "initial load failed");
                self.transition(|state| {
                    state.status = SyncStatus::Failed(err.clone());
                    state.data = None;
                    state.last_synced = None;
                });
                Err(err)
            }
        }
    }

    /// Ask the service to recompute, then reload the pair.
    ///
    /// The trigger is acknowledged before any fetch is issued. A failure keeps
    /// the previous pair on screen and is recorded as a transient notice; it is
    /// only fatal when there is nothing to fall back on.
    pub async fn refresh(&self) -> Result<SyncOutcome, SyncError> {
        if self.is_busy() {
            debug!(status = self.state.borrow().status.label(), "refresh skipped");
            return Ok(SyncOutcome::Skipped);
        }

        self.transition(|state| {
            state.status = SyncStatus::Refreshing;
            state.notice = None;
        });

        let reloaded = match self.service.trigger_refresh().await {
            Ok(()) => self.fetch_pair().await,
            Err(err) => Err(err),
        };

        match reloaded {
            Ok(data) => {
                self.publish(data);
                Ok(SyncOutcome::Applied)
            }
            Err(err) => {
                warn!(error = %err, "refresh failed");
                self.transition(|state| {
                    if state.data.is_some() {
                        state.status = SyncStatus::Ready;
                        state.notice = Some(err.clone());
                    } else {
                        state.status = SyncStatus::Failed(err.clone());
                    }
                });
                Err(err)
            }
        }
    }

    /// Both fetches run concurrently and both must finish before anything is
    /// published. A snapshot error wins over a history error.
    async fn fetch_pair(&self) -> Result<SegmentData, SyncError> {
        let (snapshot, history) =
            future::join(self.service.fetch_snapshot(), self.service.fetch_history()).await;
        Ok(SegmentData {
            snapshot: snapshot?,
            history: history?,
        })
    }

    fn publish(&self, data: SegmentData) {
        info!(
            overlap = data.snapshot.overlap_count,
            history_len = data.history.len(),
            "segment data published"
        );
        self.transition(|state| {
            state.status = SyncStatus::Ready;
            state.data = Some(data);
            state.notice = None;
            state.last_synced = Some(OffsetDateTime::now_utc());
        });
    }

    fn transition(&self, update: impl FnOnce(&mut SyncState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            update(&mut state);
            debug!(status = state.status.label(), "sync transition");
            state.clone()
        };
        // No borrow is held here, so the observer may call back in.
        if let Some(observer) = &self.observer {
            observer(&snapshot);
        }
    }
}
