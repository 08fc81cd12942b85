//! Error types for the failsafe core.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the failsafe circuit breaker and its helpers.
#[derive(Debug, Error)]
pub enum FailsafeError {
    /// Writing the shared state snapshot failed. The local state may already
    /// reflect the requested transition.
    #[error("an attempt to update the persistent state tracking information failed: {source}")]
    Persistence {
        #[source]
        source: StoreError,
    },

    /// A resource kind outside the known worker_pool / job_group variants.
    #[error("Unknown resource kind: {0:?}")]
    UnknownResourceKind(String),

    /// Runtime wiring (store or notifier construction) failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for failsafe operations.
pub type FailsafeResult<T> = Result<T, FailsafeError>;
