use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{GateHandle, LAYOUT_TEMPLATE, SyncOutcome, UploadGate, is_layout_only};
use crate::actor::messages::{GateMsg, WsMsg};
use crate::reload::ReloadEvent;
use crate::sync::{SyncError, ThemeSync, UploadSet};

/// Recording sync client with configurable latency and failure.
struct MockSync {
    calls: Mutex<Vec<UploadSet>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
    fail: AtomicBool,
}

impl MockSync {
    fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay,
            fail: AtomicBool::new(false),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl ThemeSync for MockSync {
    fn sync(&self, upload: &[String]) -> impl Future<Output = Result<(), SyncError>> + Send {
        let upload = upload.to_vec();
        async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.calls.lock().push(upload);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail.load(Ordering::SeqCst) {
                Err(SyncError::Rejected {
                    key: "/assets/theme.js".into(),
                    status: 500,
                    detail: "mock failure".into(),
                })
            } else {
                Ok(())
            }
        }
    }
}

struct Harness {
    handle: GateHandle,
    client: Arc<MockSync>,
    ws_rx: mpsc::Receiver<WsMsg>,
    _gate_tx: mpsc::Sender<GateMsg>,
}

fn spawn_gate(client: MockSync) -> Harness {
    let (gate_tx, gate_rx) = mpsc::channel(8);
    let (ws_tx, ws_rx) = mpsc::channel(8);
    let client = Arc::new(client);

    let gate = UploadGate::new(gate_rx, Arc::clone(&client), ws_tx);
    tokio::spawn(gate.run());

    Harness {
        handle: GateHandle::new(gate_tx.clone()),
        client,
        ws_rx,
        _gate_tx: gate_tx,
    }
}

fn published_actions(ws_rx: &mut mpsc::Receiver<WsMsg>) -> Vec<ReloadEvent> {
    let mut actions = Vec::new();
    while let Ok(msg) = ws_rx.try_recv() {
        if let WsMsg::Publish(event) = msg {
            actions.push(event);
        }
    }
    actions
}

#[tokio::test]
async fn test_empty_set_is_trivial_success() {
    let mut h = spawn_gate(MockSync::new());

    let outcome = h.handle.submit(Vec::new()).await.await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Skipped));
    assert_eq!(h.client.call_count(), 0);
    assert!(published_actions(&mut h.ws_rx).is_empty());
}

#[tokio::test]
async fn test_successful_sync_publishes_exactly_once() {
    let mut h = spawn_gate(MockSync::new());

    let set = vec!["/assets/theme.js".to_string(), "/layout/theme.liquid".to_string()];
    let outcome = h.handle.submit(set.clone()).await.await.unwrap();

    assert!(outcome.is_uploaded());
    assert_eq!(h.client.call_count(), 1);
    assert_eq!(h.client.calls.lock()[0], set);

    let actions = published_actions(&mut h.ws_rx);
    assert_eq!(actions, vec![ReloadEvent::upload_finished()]);
}

#[tokio::test]
async fn test_layout_only_set_suppresses_notification() {
    let mut h = spawn_gate(MockSync::new());

    let outcome = h
        .handle
        .submit(vec![LAYOUT_TEMPLATE.to_string()])
        .await
        .await
        .unwrap();

    // Upload happened, but no client was notified
    assert!(outcome.is_uploaded());
    assert_eq!(h.client.call_count(), 1);
    assert!(published_actions(&mut h.ws_rx).is_empty());
}

#[tokio::test]
async fn test_submissions_are_serialized() {
    let h = spawn_gate(MockSync::with_delay(Duration::from_millis(50)));

    let first = h.handle.submit(vec!["/assets/a.js".to_string()]).await;
    let second = h.handle.submit(vec!["/assets/b.js".to_string()]).await;

    assert!(first.await.unwrap().is_uploaded());
    assert!(second.await.unwrap().is_uploaded());

    // Never two remote calls at once, and strict arrival order
    assert_eq!(h.client.max_in_flight.load(Ordering::SeqCst), 1);
    let calls = h.client.calls.lock();
    assert_eq!(*calls, vec![
        vec!["/assets/a.js".to_string()],
        vec!["/assets/b.js".to_string()],
    ]);
}

#[tokio::test]
async fn test_failure_skips_notification_and_keeps_gate_usable() {
    let mut h = spawn_gate(MockSync::new());
    h.client.fail.store(true, Ordering::SeqCst);

    let outcome = h
        .handle
        .submit(vec!["/assets/theme.js".to_string()])
        .await
        .await
        .unwrap();
    assert!(outcome.is_failed());
    assert!(published_actions(&mut h.ws_rx).is_empty());

    // The failure is local to that submission
    h.client.fail.store(false, Ordering::SeqCst);
    let outcome = h
        .handle
        .submit(vec!["/assets/theme.css".to_string()])
        .await
        .await
        .unwrap();
    assert!(outcome.is_uploaded());
    assert_eq!(published_actions(&mut h.ws_rx).len(), 1);
}

#[test]
fn test_is_layout_only() {
    assert!(is_layout_only(&[LAYOUT_TEMPLATE.to_string()]));
    assert!(!is_layout_only(&[]));
    assert!(!is_layout_only(&["/assets/theme.js".to_string()]));
    assert!(!is_layout_only(&[
        LAYOUT_TEMPLATE.to_string(),
        "/assets/theme.js".to_string(),
    ]));
}
