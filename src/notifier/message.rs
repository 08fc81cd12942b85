//! Failure message payload handed to every notifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a failure notification was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Worker-pool scaling failed or the daemon entered failsafe mode.
    ClusterFailsafeMode,
    /// A job group failed to scale.
    JobGroupFailsafeMode,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::ClusterFailsafeMode => "cluster_failsafe_mode",
            FailureReason::JobGroupFailsafeMode => "job_group_failsafe_mode",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire payload describing a single failure event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMessage {
    /// Alert identifier used by the receiving system for deduplication.
    pub alert_uid: String,
    /// Cluster the failure occurred in.
    pub cluster_identifier: String,
    pub reason: FailureReason,
    /// Node or job group that failed.
    pub failed_resource: String,
}
