//! Shared daemon state tracked by the failsafe circuit breaker.
//!
//! # Ownership
//! ```text
//! state store (source of truth)
//!     → read into a per-process DaemonState cache
//!     → mutated by the breaker on trip/reset
//!     → written back as a full snapshot
//! ```
//!
//! # Design Decisions
//! - State is passed explicitly as `&mut`, never held in a global
//! - Only the breaker flag and failure payload are persisted
//! - Per-resource scaling state lives in memory only

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Daemon-wide state shared by every running copy through the state store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonState {
    /// Whether the failsafe circuit breaker is tripped.
    pub failsafe_mode: bool,

    /// Identifier of the most recently failed resource.
    pub last_failed_node: String,

    /// Consecutive node failure counter.
    pub node_failure_count: u32,
}

impl DaemonState {
    /// Record a failed worker-pool node as the payload for the next trip.
    pub fn record_node_failure(&mut self, node_id: impl Into<String>) {
        self.last_failed_node = node_id.into();
        self.node_failure_count = self.node_failure_count.saturating_add(1);
    }

    /// Clear the consecutive failure counter after a successful operation.
    pub fn reset_failure_count(&mut self) {
        self.node_failure_count = 0;
    }
}

/// In-memory scaling bookkeeping for a single worker pool or job group.
#[derive(Debug, Clone, Default)]
pub struct ScalingState {
    /// When a failure notification was last attempted for this resource.
    pub last_notification_event: Option<SystemTime>,
}
