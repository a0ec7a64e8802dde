//! Lifecycle tests for the sync controller against a scripted in-memory service.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::task::Poll;

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::poll_fn;

use ui::core::{
    HistoryRecord, SegmentService, Snapshot, SyncController, SyncError, SyncOutcome, SyncState,
    SyncStatus,
};

#[derive(Default)]
struct ScriptedService {
    /// Call order, recorded when each request is issued.
    calls: RefCell<Vec<&'static str>>,
    /// Progress markers, recorded as the request futures are polled.
    events: RefCell<Vec<&'static str>>,
    snapshots: RefCell<Vec<Result<Snapshot, SyncError>>>,
    histories: RefCell<Vec<Result<Vec<HistoryRecord>, SyncError>>>,
    refreshes: RefCell<Vec<Result<(), SyncError>>>,
    refresh_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl ScriptedService {
    fn push_snapshot(&self, result: Result<Snapshot, SyncError>) {
        self.snapshots.borrow_mut().push(result);
    }

    fn push_history(&self, result: Result<Vec<HistoryRecord>, SyncError>) {
        self.histories.borrow_mut().push(result);
    }

    fn push_refresh(&self, result: Result<(), SyncError>) {
        self.refreshes.borrow_mut().push(result);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == name).count()
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.borrow().clone()
    }

    fn position(&self, event: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .position(|seen| *seen == event)
            .unwrap_or_else(|| panic!("{event} never happened: {:?}", self.events()))
    }
}

/// Return `Pending` once so sibling futures get polled in between.
async fn yield_once() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

fn next<T>(queue: &RefCell<Vec<Result<T, SyncError>>>, what: &str) -> Result<T, SyncError> {
    let mut queue = queue.borrow_mut();
    assert!(!queue.is_empty(), "unexpected {what} call");
    queue.remove(0)
}

impl SegmentService for ScriptedService {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, SyncError>> {
        self.calls.borrow_mut().push("snapshot");
        let result = next(&self.snapshots, "snapshot");
        async move {
            self.events.borrow_mut().push("snapshot:start");
            yield_once().await;
            self.events.borrow_mut().push("snapshot:end");
            result
        }
    }

    fn fetch_history(&self) -> impl Future<Output = Result<Vec<HistoryRecord>, SyncError>> {
        self.calls.borrow_mut().push("history");
        let result = next(&self.histories, "history");
        async move {
            self.events.borrow_mut().push("history:start");
            self.events.borrow_mut().push("history:end");
            result
        }
    }

    fn trigger_refresh(&self) -> impl Future<Output = Result<(), SyncError>> {
        self.calls.borrow_mut().push("refresh");
        let result = next(&self.refreshes, "refresh");
        let gate = self.refresh_gate.borrow_mut().take();
        async move {
            self.events.borrow_mut().push("refresh:start");
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.events.borrow_mut().push("refresh:end");
            result
        }
    }
}

fn snapshot(overlap_count: u64) -> Snapshot {
    Snapshot {
        total_a: 100,
        total_b: 50,
        overlap_count,
        percent_overlap: 25.0,
    }
}

fn history(len: usize) -> Vec<HistoryRecord> {
    (0..len)
        .map(|idx| HistoryRecord {
            timestamp: format!("2024-01-01 1{idx}:00:00"),
            total_a: 100,
            total_b: 80,
            overlap: 20,
        })
        .collect()
}

fn recording_controller(
    service: ScriptedService,
) -> (SyncController<ScriptedService>, Rc<RefCell<Vec<SyncState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let controller = SyncController::new(service)
        .with_observer(move |state: &SyncState| sink.borrow_mut().push(state.clone()));
    (controller, seen)
}

fn loaded_controller() -> (SyncController<ScriptedService>, Rc<RefCell<Vec<SyncState>>>) {
    let service = ScriptedService::default();
    service.push_snapshot(Ok(snapshot(30)));
    service.push_history(Ok(history(2)));
    let (controller, seen) = recording_controller(service);
    assert_eq!(block_on(controller.load_initial()), Ok(SyncOutcome::Applied));
    (controller, seen)
}

#[test]
fn initial_load_publishes_pair_and_becomes_ready() {
    let (controller, seen) = loaded_controller();

    let state = controller.state();
    assert_eq!(state.status, SyncStatus::Ready);
    assert_eq!(state.snapshot(), Some(&snapshot(30)));
    assert_eq!(state.history().len(), 2);
    assert!(state.last_synced.is_some());

    let statuses: Vec<SyncStatus> = seen.borrow().iter().map(|s| s.status.clone()).collect();
    assert_eq!(statuses, vec![SyncStatus::Loading, SyncStatus::Ready]);
    assert_eq!(controller.service().calls(), vec!["snapshot", "history"]);
}

#[test]
fn initial_load_history_failure_publishes_nothing() {
    let service = ScriptedService::default();
    service.push_snapshot(Ok(snapshot(30)));
    service.push_history(Err(SyncError::MalformedResponse("missing overlap".into())));
    let (controller, seen) = recording_controller(service);

    let result = block_on(controller.load_initial());
    assert_eq!(
        result,
        Err(SyncError::MalformedResponse("missing overlap".into()))
    );

    let state = controller.state();
    assert!(matches!(state.status, SyncStatus::Failed(_)));
    assert!(state.data.is_none());
    assert!(seen.borrow().iter().all(|s| s.data.is_none()));
    assert_eq!(controller.service().calls(), vec!["snapshot", "history"]);
    // Both requests ran to completion before the failure was published.
    let events = controller.service().events();
    assert!(events.contains(&"snapshot:end") && events.contains(&"history:end"));
}

#[test]
fn initial_load_fetches_run_concurrently() {
    let (controller, _) = loaded_controller();
    let service = controller.service();

    // History starts while the snapshot request is still pending.
    assert!(service.position("history:start") < service.position("snapshot:end"));
}

#[test]
fn initial_load_snapshot_failure_is_fatal() {
    let service = ScriptedService::default();
    service.push_snapshot(Err(SyncError::NetworkFailure("connection reset".into())));
    service.push_history(Ok(history(1)));
    let (controller, _) = recording_controller(service);

    let result = block_on(controller.load_initial());
    assert!(matches!(result, Err(SyncError::NetworkFailure(_))));
    assert_eq!(
        controller.state().failure(),
        Some(&SyncError::NetworkFailure("connection reset".into()))
    );
    // The failed snapshot does not cut the history request short.
    let service = controller.service();
    assert_eq!(service.calls(), vec!["snapshot", "history"]);
    assert!(service.position("history:start") < service.position("snapshot:end"));
    assert!(service.events().contains(&"history:end"));
}

#[test]
fn refetch_waits_for_refresh_acknowledgement() {
    let (controller, _) = loaded_controller();
    let service = controller.service();
    let (release, gate) = oneshot::channel();
    *service.refresh_gate.borrow_mut() = Some(gate);
    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(36)));
    service.push_history(Ok(history(2)));

    let (refreshed, ()) = block_on(async {
        futures::join!(controller.refresh(), async move {
            // The trigger is parked on the gate; only the initial load has fetched.
            assert_eq!(service.count("snapshot"), 1);
            assert_eq!(service.count("history"), 1);
            assert_eq!(service.events().last(), Some(&"refresh:start"));
            let _ = release.send(());
        })
    });

    assert_eq!(refreshed, Ok(SyncOutcome::Applied));
    let events = service.events();
    let refetch = &events[events.len() - 4..];
    assert_eq!(events[events.len() - 5], "refresh:end");
    assert!(refetch.contains(&"snapshot:start") && refetch.contains(&"history:end"));
}

#[test]
fn refresh_triggers_before_refetching() {
    let (controller, seen) = loaded_controller();
    let service = controller.service();
    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(35)));
    service.push_history(Ok(history(3)));

    assert_eq!(block_on(controller.refresh()), Ok(SyncOutcome::Applied));

    assert_eq!(
        service.calls(),
        vec!["snapshot", "history", "refresh", "snapshot", "history"]
    );
    let state = controller.state();
    assert_eq!(state.status, SyncStatus::Ready);
    assert_eq!(state.snapshot().map(|s| s.overlap_count), Some(35));
    assert_eq!(state.history().len(), 3);

    // Stale data stays visible while refreshing.
    let refreshing = seen
        .borrow()
        .iter()
        .find(|s| s.status == SyncStatus::Refreshing)
        .cloned()
        .unwrap();
    assert_eq!(refreshing.snapshot().map(|s| s.overlap_count), Some(30));
}

#[test]
fn rejected_refresh_keeps_previous_data() {
    let (controller, _) = loaded_controller();
    controller
        .service()
        .push_refresh(Err(SyncError::RefreshRejected("HTTP 500".into())));

    let result = block_on(controller.refresh());
    assert_eq!(result, Err(SyncError::RefreshRejected("HTTP 500".into())));

    let state = controller.state();
    assert_eq!(state.status, SyncStatus::Ready);
    assert_eq!(state.snapshot(), Some(&snapshot(30)));
    assert_eq!(
        state.notice,
        Some(SyncError::RefreshRejected("HTTP 500".into()))
    );
    // No reload after a rejected trigger.
    assert_eq!(controller.service().count("snapshot"), 1);
}

#[test]
fn refetch_failure_after_refresh_is_transient() {
    let (controller, _) = loaded_controller();
    let service = controller.service();
    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(40)));
    service.push_history(Err(SyncError::NetworkFailure("timeout".into())));

    assert!(block_on(controller.refresh()).is_err());

    let state = controller.state();
    assert_eq!(state.status, SyncStatus::Ready);
    // The half-fetched snapshot never replaces the old pair.
    assert_eq!(state.snapshot().map(|s| s.overlap_count), Some(30));
    assert_eq!(state.history().len(), 2);
    assert!(state.notice.is_some());
}

#[test]
fn notice_clears_on_next_successful_refresh() {
    let (controller, _) = loaded_controller();
    let service = controller.service();
    service.push_refresh(Err(SyncError::RefreshRejected("HTTP 502".into())));
    assert!(block_on(controller.refresh()).is_err());
    assert!(controller.state().notice.is_some());

    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(31)));
    service.push_history(Ok(history(2)));
    assert_eq!(block_on(controller.refresh()), Ok(SyncOutcome::Applied));
    assert!(controller.state().notice.is_none());
}

#[test]
fn overlapping_refresh_is_ignored() {
    let (controller, _) = loaded_controller();
    let service = controller.service();
    let (release, gate) = oneshot::channel();
    *service.refresh_gate.borrow_mut() = Some(gate);
    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(32)));
    service.push_history(Ok(history(2)));

    let (first, second, ()) = block_on(async {
        futures::join!(controller.refresh(), controller.refresh(), async move {
            let _ = release.send(());
        })
    });

    assert_eq!(first, Ok(SyncOutcome::Applied));
    assert_eq!(second, Ok(SyncOutcome::Skipped));
    assert_eq!(service.count("refresh"), 1);
    assert_eq!(controller.state().status, SyncStatus::Ready);
}

#[test]
fn load_during_refresh_is_ignored() {
    let (controller, _) = loaded_controller();
    let service = controller.service();
    let (release, gate) = oneshot::channel();
    *service.refresh_gate.borrow_mut() = Some(gate);
    service.push_refresh(Ok(()));
    service.push_snapshot(Ok(snapshot(33)));
    service.push_history(Ok(history(2)));

    let (refreshed, loaded, ()) = block_on(async {
        futures::join!(controller.refresh(), controller.load_initial(), async move {
            let _ = release.send(());
        })
    });

    assert_eq!(refreshed, Ok(SyncOutcome::Applied));
    assert_eq!(loaded, Ok(SyncOutcome::Skipped));
    assert_eq!(service.count("snapshot"), 2);
}

#[test]
fn refresh_without_prior_data_fails_fatally() {
    let service = ScriptedService::default();
    service.push_refresh(Err(SyncError::NetworkFailure("offline".into())));
    let (controller, _) = recording_controller(service);

    assert!(block_on(controller.refresh()).is_err());
    let state = controller.state();
    assert!(matches!(state.status, SyncStatus::Failed(_)));
    assert!(state.notice.is_none());
}

#[test]
fn retry_after_failed_load_recovers() {
    let service = ScriptedService::default();
    service.push_snapshot(Err(SyncError::NetworkFailure("cold start".into())));
    service.push_history(Ok(history(1)));
    let (controller, _) = recording_controller(service);
    assert!(block_on(controller.load_initial()).is_err());

    controller.service().push_snapshot(Ok(snapshot(30)));
    controller.service().push_history(Ok(history(1)));
    assert_eq!(block_on(controller.load_initial()), Ok(SyncOutcome::Applied));
    assert_eq!(controller.state().status, SyncStatus::Ready);
}
