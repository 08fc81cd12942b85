//! Scaling failsafe daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────── daemon ────────────────────────────┐
//!   │                                                                 │
//!   │  interval ──▶ refresh state ──▶ CircuitBreaker::check ──┐       │
//!   │                    ▲                                    │       │
//!   │                    │                          passing   │ open  │
//!   │              ┌─────┴──────┐                     ▼       ▼       │
//!   │              │state store │◀── trip/reset ── evaluator  skip    │
//!   │              └────────────┘         │                           │
//!   │                                     ▼                           │
//!   │                           notifier fan-out                      │
//!   └─────────────────────────────────────────────────────────────────┘
//!         ▲
//!         │  failsafe-cli enable / disable (operator)
//! ```
//!
//! The daemon hosts the failsafe gate. Scaling logic plugs in through
//! [`ScalingEvaluator`]; this binary runs with a watch-only evaluator that
//! reports when the breaker permits work.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;

use scaling_failsafe::config::{load_config, FailsafeConfig};
use scaling_failsafe::daemon::{EvaluationLoop, ScalingEvaluator};
use scaling_failsafe::failsafe::CircuitBreaker;
use scaling_failsafe::lifecycle::{signals, startup, Shutdown};
use scaling_failsafe::observability::{logging, metrics};
use scaling_failsafe::state::DaemonState;

#[derive(Parser)]
#[command(name = "scaling-failsafe")]
#[command(about = "Failsafe circuit breaker daemon for cluster autoscaling", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Evaluator that only reports permitted evaluation windows.
struct WatchOnly;

#[async_trait]
impl ScalingEvaluator for WatchOnly {
    async fn evaluate(&mut self, _breaker: &CircuitBreaker, state: &mut DaemonState) {
        tracing::debug!(
            node_failure_count = state.node_failure_count,
            "Scaling evaluation permitted"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FailsafeConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("scaling-failsafe v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let breaker_config = startup::build_breaker_config(&config)?;
    let cluster = breaker_config.notification.cluster_identifier.clone();
    let store = breaker_config.store.clone();

    let state = store.read_state(&cluster).await?.unwrap_or_default();
    if state.failsafe_mode {
        tracing::warn!(cluster = %cluster, "Failsafe mode is active; scaling stays halted until an operator resets it");
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::wait_for_signal(shutdown.clone()));

    let evaluation = EvaluationLoop::new(
        CircuitBreaker::new(breaker_config),
        Duration::from_secs(config.daemon.evaluation_interval_secs),
    );
    let final_state = evaluation.run(state, WatchOnly, shutdown.subscribe()).await;

    tracing::info!(failsafe_mode = final_state.failsafe_mode, "Shutdown complete");
    Ok(())
}
