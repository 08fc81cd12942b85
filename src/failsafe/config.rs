//! Runtime configuration consumed by the breaker and failure notifier.

use std::fmt;
use std::sync::Arc;

use crate::notifier::Notifier;
use crate::store::StateStore;

/// Notification settings shared by breaker trips and resource failures.
#[derive(Clone, Default)]
pub struct NotificationConfig {
    /// Alert identifier attached to cluster failsafe notifications.
    pub cluster_scaling_uid: String,
    /// Identifies this cluster in messages and in the state store.
    pub cluster_identifier: String,
    /// Backends to notify, in order.
    pub notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotificationConfig {
    pub fn has_notifiers(&self) -> bool {
        !self.notifiers.is_empty()
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.notifiers.iter().map(|n| n.name()).collect();
        f.debug_struct("NotificationConfig")
            .field("cluster_scaling_uid", &self.cluster_scaling_uid)
            .field("cluster_identifier", &self.cluster_identifier)
            .field("notifiers", &names)
            .finish()
    }
}

/// Everything the circuit breaker needs to check, trip and reset.
#[derive(Clone)]
pub struct BreakerConfig {
    /// Consecutive failures that would trip the breaker automatically.
    /// Carried for operators; the automatic trip is currently disabled.
    pub retry_threshold: u32,
    pub notification: NotificationConfig,
    pub store: Arc<dyn StateStore>,
}

impl fmt::Debug for BreakerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakerConfig")
            .field("retry_threshold", &self.retry_threshold)
            .field("notification", &self.notification)
            .finish_non_exhaustive()
    }
}
