//! Failsafe-gated scaling evaluation loop.
//!
//! # Data Flow
//! ```text
//! interval tick
//!     → refresh DaemonState from the state store
//!     → CircuitBreaker::check
//!         passing → ScalingEvaluator::evaluate (may trip the breaker)
//!         tripped → skip, count, wait for next tick
//! ```
//!
//! # Design Decisions
//! - The store is re-read every tick so trips by other daemons are observed
//! - Only the breaker flag is taken from the store; failure bookkeeping is local
//! - A failed refresh keeps the cached state; it never clears a trip
//! - Shutdown is observed between ticks, never mid-evaluation

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::failsafe::CircuitBreaker;
use crate::observability::metrics;
use crate::state::DaemonState;

/// Scaling logic run on every tick the breaker permits.
#[async_trait]
pub trait ScalingEvaluator: Send {
    /// Evaluate and perform scaling. Call `breaker.trip(state)` on a
    /// critical failure.
    async fn evaluate(&mut self, breaker: &CircuitBreaker, state: &mut DaemonState);
}

/// Periodically gates a [`ScalingEvaluator`] behind the failsafe breaker.
pub struct EvaluationLoop {
    breaker: CircuitBreaker,
    interval: Duration,
}

impl EvaluationLoop {
    pub fn new(breaker: CircuitBreaker, interval: Duration) -> Self {
        Self { breaker, interval }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Adopt the persisted failsafe flag, if a snapshot exists.
    ///
    /// Failure bookkeeping (`last_failed_node`, `node_failure_count`) is only
    /// written on trip or reset, so the cached values are kept.
    pub async fn refresh_state(&self, state: &mut DaemonState) {
        let cluster = &self.breaker.config().notification.cluster_identifier;
        match self.breaker.config().store.read_state(cluster).await {
            Ok(Some(stored)) => state.failsafe_mode = stored.failsafe_mode,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(cluster = %cluster, error = %e, "Failed to refresh failsafe state, using cached copy");
            }
        }
    }

    /// Run a single gated evaluation. Returns whether the evaluator ran.
    pub async fn tick<E: ScalingEvaluator>(&self, state: &mut DaemonState, evaluator: &mut E) -> bool {
        self.refresh_state(state).await;

        if !self.breaker.check(state).await {
            tracing::debug!("Failsafe mode active, skipping scaling evaluation");
            metrics::record_evaluation_skipped();
            return false;
        }

        evaluator.evaluate(&self.breaker, state).await;
        true
    }

    /// Tick until shutdown is signalled, returning the final cached state.
    pub async fn run<E: ScalingEvaluator>(
        self,
        mut state: DaemonState,
        mut evaluator: E,
        mut shutdown: broadcast::Receiver<()>,
    ) -> DaemonState {
        tracing::info!(interval_secs = self.interval.as_secs(), "Evaluation loop starting");

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(&mut state, &mut evaluator).await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Evaluation loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        state
    }
}
