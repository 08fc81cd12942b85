//! In-process state store.
//!
//! Shares state between breakers built from the same store handle. Useful
//! for single-process deployments and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::state::DaemonState;
use crate::store::{StateStore, StoreResult};

/// A thread-safe map of cluster identifier to state snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<DashMap<String, DaemonState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clusters with a stored snapshot.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn write_state(&self, cluster_identifier: &str, state: &DaemonState) -> StoreResult<()> {
        self.inner.insert(cluster_identifier.to_string(), state.clone());
        Ok(())
    }

    async fn read_state(&self, cluster_identifier: &str) -> StoreResult<Option<DaemonState>> {
        Ok(self.inner.get(cluster_identifier).map(|r| r.value().clone()))
    }
}
