//! Check/trip/reset state machine gating every scaling operation.

use crate::error::{FailsafeError, FailsafeResult};
use crate::failsafe::config::BreakerConfig;
use crate::notifier::{dispatch, FailureMessage, FailureReason};
use crate::observability::metrics;
use crate::state::DaemonState;

/// Who requested a failsafe transition.
///
/// Operator-initiated transitions come from interactive tooling that reports
/// the outcome itself, so the breaker does not log them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initiator {
    #[default]
    Daemon,
    Operator,
}

/// Distributed failsafe lock shared by every running daemon.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    config: BreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Returns whether scaling evaluations may proceed.
    ///
    /// A tripped breaker fails fast with no side effects.
    pub async fn check(&self, state: &mut DaemonState) -> bool {
        if state.failsafe_mode {
            return false;
        }

        // Automatic trip on node_failure_count >= retry_threshold is disabled;
        // failsafe mode is only entered through an explicit transition.
        let passing = true;

        if passing {
            tracing::debug!("Failsafe check passed, scaling evaluations and operations permitted");
        } else if let Err(e) = self.trip(state).await {
            tracing::error!(error = %e, "Failed to persist failsafe trip");
        }

        passing
    }

    /// Place the daemon fleet in failsafe mode.
    pub async fn trip(&self, state: &mut DaemonState) -> FailsafeResult<()> {
        self.set_failsafe_mode(state, true, Initiator::Daemon).await
    }

    /// Toggle the distributed failsafe lock and persist the result.
    ///
    /// The local flag is updated before the write. If the write fails the
    /// local state stays at `enabled` while the store keeps its previous
    /// value, and the error is returned.
    pub async fn set_failsafe_mode(
        &self,
        state: &mut DaemonState,
        enabled: bool,
        initiator: Initiator,
    ) -> FailsafeResult<()> {
        let notification = &self.config.notification;

        if enabled {
            if !state.failsafe_mode && notification.has_notifiers() {
                let message = FailureMessage {
                    alert_uid: notification.cluster_scaling_uid.clone(),
                    cluster_identifier: notification.cluster_identifier.clone(),
                    reason: FailureReason::ClusterFailsafeMode,
                    failed_resource: state.last_failed_node.clone(),
                };
                dispatch(&message, &notification.notifiers).await;
            }

            if initiator == Initiator::Daemon {
                tracing::warn!(
                    cluster = %notification.cluster_identifier,
                    "Daemon placed in failsafe mode. No scaling evaluations or operations will be \
                     permitted from any running copy of the daemon"
                );
            }
        } else if initiator == Initiator::Daemon {
            tracing::info!(cluster = %notification.cluster_identifier, "Exiting failsafe mode");
        }

        state.failsafe_mode = enabled;

        if let Err(source) = self
            .config
            .store
            .write_state(&notification.cluster_identifier, state)
            .await
        {
            metrics::record_persistence_failure();
            return Err(FailsafeError::Persistence { source });
        }

        metrics::record_failsafe_mode(enabled);
        Ok(())
    }
}
