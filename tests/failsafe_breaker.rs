//! Circuit breaker behavior across check, trip and reset.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::SystemTime;

use scaling_failsafe::failsafe::{CircuitBreaker, FailureNotifier, Initiator, ResourceKind};
use scaling_failsafe::notifier::{FailureReason, Notifier};
use scaling_failsafe::state::{DaemonState, ScalingState};
use scaling_failsafe::store::StateStore;
use scaling_failsafe::FailsafeError;

mod common;
use common::{breaker_config, RecordingNotifier, RecordingStore};

fn setup(store: RecordingStore) -> (CircuitBreaker, Arc<RecordingStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::default());
    let breaker = CircuitBreaker::new(breaker_config(
        store.clone(),
        vec![notifier.clone() as Arc<dyn Notifier>],
    ));
    (breaker, store, notifier)
}

#[tokio::test]
async fn test_open_breaker_check_has_no_side_effects() {
    let (breaker, store, notifier) = setup(RecordingStore::default());
    let mut state = DaemonState {
        failsafe_mode: true,
        last_failed_node: "node-1".into(),
        node_failure_count: 0,
    };

    for _ in 0..3 {
        assert!(!breaker.check(&mut state).await);
    }

    assert!(state.failsafe_mode);
    assert_eq!(store.calls(), 0);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_closed_breaker_passes_regardless_of_failures() {
    let (breaker, store, notifier) = setup(RecordingStore::default());

    for count in [0, 2, 3, 50, u32::MAX] {
        let mut state = DaemonState {
            node_failure_count: count,
            ..Default::default()
        };
        assert!(breaker.check(&mut state).await, "failure count {} tripped the breaker", count);
        assert!(!state.failsafe_mode);
    }

    assert_eq!(store.calls(), 0);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_trip_notifies_and_persists() {
    let (breaker, store, notifier) = setup(RecordingStore::default());
    let mut state = DaemonState::default();
    state.record_node_failure("node-7");

    breaker.trip(&mut state).await.unwrap();

    assert!(state.failsafe_mode);
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].reason, FailureReason::ClusterFailsafeMode);
    assert_eq!(messages[0].failed_resource, "node-7");
    assert_eq!(messages[0].alert_uid, "cluster-uid");
    assert_eq!(messages[0].cluster_identifier, "prod-east");

    let stored = store.read_state("prod-east").await.unwrap().unwrap();
    assert!(stored.failsafe_mode);
    assert_eq!(stored.last_failed_node, "node-7");
}

#[tokio::test]
async fn test_redundant_trip_persists_without_second_notification() {
    let (breaker, store, notifier) = setup(RecordingStore::default());
    let mut state = DaemonState::default();

    breaker.trip(&mut state).await.unwrap();
    breaker
        .set_failsafe_mode(&mut state, true, Initiator::Operator)
        .await
        .unwrap();

    assert!(state.failsafe_mode);
    assert_eq!(notifier.messages().len(), 1);
    assert_eq!(store.writes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_trip_without_notifiers_still_persists() {
    let store = Arc::new(RecordingStore::default());
    let breaker = CircuitBreaker::new(breaker_config(store.clone(), Vec::new()));
    let mut state = DaemonState::default();

    breaker.trip(&mut state).await.unwrap();

    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    assert!(store.read_state("prod-east").await.unwrap().unwrap().failsafe_mode);
}

#[tokio::test]
async fn test_reset_sends_no_notification() {
    let (breaker, store, notifier) = setup(RecordingStore::default());
    let mut state = DaemonState {
        failsafe_mode: true,
        ..Default::default()
    };

    breaker
        .set_failsafe_mode(&mut state, false, Initiator::Operator)
        .await
        .unwrap();

    assert!(!state.failsafe_mode);
    assert!(notifier.messages().is_empty());
    assert!(!store.read_state("prod-east").await.unwrap().unwrap().failsafe_mode);
    assert!(breaker.check(&mut state).await);
}

#[tokio::test]
async fn test_persistence_failure_is_returned_in_both_directions() {
    for enabled in [true, false] {
        let (breaker, _store, _notifier) = setup(RecordingStore::failing());
        let mut state = DaemonState {
            failsafe_mode: !enabled,
            ..Default::default()
        };

        let err = breaker
            .set_failsafe_mode(&mut state, enabled, Initiator::Daemon)
            .await
            .unwrap_err();

        assert!(matches!(err, FailsafeError::Persistence { .. }));
        assert!(err
            .to_string()
            .contains("an attempt to update the persistent state tracking information failed"));
        // Local state is updated before the write is attempted.
        assert_eq!(state.failsafe_mode, enabled);
    }
}

#[tokio::test]
async fn test_persistence_failure_still_notifies() {
    let (breaker, _store, notifier) = setup(RecordingStore::failing());
    let mut state = DaemonState::default();

    assert!(breaker.trip(&mut state).await.is_err());
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_worker_pool_failure_notification() {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = breaker_config(
        Arc::new(RecordingStore::default()),
        vec![notifier.clone() as Arc<dyn Notifier>],
    );
    let failures = FailureNotifier::new(config.notification);
    let mut scaling = ScalingState::default();
    let start = SystemTime::now();

    failures
        .notify_resource_failure("node-7", ResourceKind::WorkerPool, "uid-42", &mut scaling)
        .await;

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].reason.as_str(), "cluster_failsafe_mode");
    assert_eq!(messages[0].failed_resource, "node-7");
    assert_eq!(messages[0].alert_uid, "uid-42");
    assert_eq!(messages[0].cluster_identifier, "prod-east");
    assert!(scaling.last_notification_event.unwrap() >= start);
}

#[tokio::test]
async fn test_job_group_failure_notification() {
    let notifier = Arc::new(RecordingNotifier::default());
    let store = Arc::new(RecordingStore::default());
    let config = breaker_config(store.clone(), vec![notifier.clone() as Arc<dyn Notifier>]);
    let failures = FailureNotifier::new(config.notification);
    let mut scaling = ScalingState::default();

    let kind: ResourceKind = "job_group".parse().unwrap();
    failures
        .notify_resource_failure("web/frontend", kind, "job-uid", &mut scaling)
        .await;

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].reason.as_str(), "job_group_failsafe_mode");
    assert!(scaling.last_notification_event.is_some());
    assert_eq!(store.calls(), 0);
}
