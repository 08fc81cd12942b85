//! Persistent state store client.
//!
//! # Data Flow
//! ```text
//! CircuitBreaker transition
//!     → StateStore::write_state (full snapshot, keyed by cluster identifier)
//!
//! Evaluation loop / operator CLI
//!     → StateStore::read_state (observe transitions made by other processes)
//! ```
//!
//! # Design Decisions
//! - Whole-snapshot writes only; no partial field updates
//! - Last writer wins; no compare-and-swap
//! - Timeouts and retries belong to the backend, not the caller

pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::DaemonState;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Errors raised by a state store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend could not be reached.
    #[error("State store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for state store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Shared persistence for [`DaemonState`] across every running daemon.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persist the full state snapshot for a cluster.
    async fn write_state(&self, cluster_identifier: &str, state: &DaemonState) -> StoreResult<()>;

    /// Read the last persisted snapshot for a cluster, if any.
    async fn read_state(&self, cluster_identifier: &str) -> StoreResult<Option<DaemonState>>;
}
