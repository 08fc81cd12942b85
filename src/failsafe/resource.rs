//! Resource-scoped failure notifications.
//!
//! # Responsibilities
//! - Map a failed resource kind to its notification reason
//! - Fan the message out to every configured notifier
//! - Stamp the resource's scaling state with the attempt time
//!
//! Independent of the circuit breaker: never reads or writes failsafe mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::error::FailsafeError;
use crate::failsafe::config::NotificationConfig;
use crate::notifier::{dispatch, FailureMessage, FailureReason};
use crate::state::ScalingState;

/// Kind of resource a scaling failure is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A node in the cluster worker pool.
    WorkerPool,
    /// A group of tasks within a job.
    JobGroup,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::WorkerPool => "worker_pool",
            ResourceKind::JobGroup => "job_group",
        }
    }

    /// Notification reason reported for a failure of this kind.
    pub fn reason(&self) -> FailureReason {
        match self {
            ResourceKind::WorkerPool => FailureReason::ClusterFailsafeMode,
            ResourceKind::JobGroup => FailureReason::JobGroupFailsafeMode,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = FailsafeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worker_pool" => Ok(ResourceKind::WorkerPool),
            "job_group" => Ok(ResourceKind::JobGroup),
            other => Err(FailsafeError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// Builds and sends failure notifications for individual resources.
#[derive(Debug, Clone)]
pub struct FailureNotifier {
    notification: NotificationConfig,
}

impl FailureNotifier {
    pub fn new(notification: NotificationConfig) -> Self {
        Self { notification }
    }

    /// Notify every backend that `resource_id` failed to scale.
    ///
    /// `scaling.last_notification_event` is set to the current time whether
    /// or not any notifier is configured.
    pub async fn notify_resource_failure(
        &self,
        resource_id: &str,
        kind: ResourceKind,
        uid: &str,
        scaling: &mut ScalingState,
    ) {
        if self.notification.has_notifiers() {
            let message = FailureMessage {
                alert_uid: uid.to_string(),
                cluster_identifier: self.notification.cluster_identifier.clone(),
                reason: kind.reason(),
                failed_resource: resource_id.to_string(),
            };
            dispatch(&message, &self.notification.notifiers).await;
        } else {
            tracing::debug!(resource = resource_id, kind = %kind, "No notifiers configured, skipping failure notification");
        }

        scaling.last_notification_event = Some(SystemTime::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("worker_pool".parse::<ResourceKind>().unwrap(), ResourceKind::WorkerPool);
        assert_eq!("job_group".parse::<ResourceKind>().unwrap(), ResourceKind::JobGroup);

        let err = "database".parse::<ResourceKind>().unwrap_err();
        assert!(matches!(err, FailsafeError::UnknownResourceKind(ref k) if k == "database"));
    }

    #[test]
    fn test_kind_reason_mapping() {
        assert_eq!(ResourceKind::WorkerPool.reason().as_str(), "cluster_failsafe_mode");
        assert_eq!(ResourceKind::JobGroup.reason().as_str(), "job_group_failsafe_mode");
    }

    #[tokio::test]
    async fn test_timestamp_set_without_notifiers() {
        let notifier = FailureNotifier::new(NotificationConfig::default());
        let mut scaling = ScalingState::default();
        let start = SystemTime::now();

        notifier
            .notify_resource_failure("node-1", ResourceKind::WorkerPool, "uid", &mut scaling)
            .await;

        assert!(scaling.last_notification_event.unwrap() >= start);
    }
}
