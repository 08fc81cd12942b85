//! Failsafe circuit breaker for a cluster-autoscaling daemon.

pub mod config;
pub mod daemon;
pub mod error;
pub mod failsafe;
pub mod lifecycle;
pub mod notifier;
pub mod observability;
pub mod state;
pub mod store;

pub use config::schema::FailsafeConfig;
pub use error::{FailsafeError, FailsafeResult};
pub use failsafe::{CircuitBreaker, FailureNotifier, Initiator, ResourceKind};
pub use lifecycle::Shutdown;
pub use state::{DaemonState, ScalingState};
