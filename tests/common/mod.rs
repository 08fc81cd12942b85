//! Shared doubles for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use scaling_failsafe::failsafe::{BreakerConfig, NotificationConfig};
use scaling_failsafe::notifier::{FailureMessage, Notifier};
use scaling_failsafe::state::DaemonState;
use scaling_failsafe::store::{MemoryStateStore, StateStore, StoreError, StoreResult};

/// Notifier that records every message it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<FailureMessage>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<FailureMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send_notification(&self, message: &FailureMessage) {
        self.messages.lock().unwrap().push(message.clone());
    }
}

/// State store wrapper that counts calls and can be told to fail writes.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStateStore,
    pub writes: AtomicUsize,
    pub reads: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst) + self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for RecordingStore {
    async fn write_state(&self, cluster_identifier: &str, state: &DaemonState) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        self.inner.write_state(cluster_identifier, state).await
    }

    async fn read_state(&self, cluster_identifier: &str) -> StoreResult<Option<DaemonState>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_state(cluster_identifier).await
    }
}

/// Breaker config for cluster "prod-east" with alert UID "cluster-uid".
pub fn breaker_config(store: Arc<dyn StateStore>, notifiers: Vec<Arc<dyn Notifier>>) -> BreakerConfig {
    BreakerConfig {
        retry_threshold: 3,
        notification: NotificationConfig {
            cluster_scaling_uid: "cluster-uid".into(),
            cluster_identifier: "prod-east".into(),
            notifiers,
        },
        store,
    }
}

/// Start a webhook receiver that answers every request with `status` and
/// forwards each request body.
pub async fn start_webhook_receiver(status: u16) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(body) = read_request_body(&mut socket).await {
                            let _ = tx.send(body);
                        }
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status_text
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

async fn read_request_body(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = (header_end + content_length).min(buf.len());
    Some(String::from_utf8_lossy(&buf[header_end..end]).to_string())
}
