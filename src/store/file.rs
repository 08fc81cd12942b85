//! File-backed state store.
//!
//! Each cluster gets one JSON document under the store directory. Every write
//! goes to its own uniquely named temporary file in the same directory and is
//! renamed into place, so readers never observe a half-written snapshot and
//! concurrent writers resolve to last-writer-wins.

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::state::DaemonState;
use crate::store::{StateStore, StoreError, StoreResult};

/// State store persisting snapshots as `<dir>/<cluster>.json`.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot for a cluster.
    ///
    /// Path separators in the identifier are replaced so a cluster can never
    /// address a file outside the store directory.
    pub fn snapshot_path(&self, cluster_identifier: &str) -> PathBuf {
        let mut file_name: String = cluster_identifier
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect();
        if matches!(file_name.as_str(), "" | "." | "..") {
            file_name.insert(0, '_');
        }
        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn write_state(&self, cluster_identifier: &str, state: &DaemonState) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.snapshot_path(cluster_identifier);
        let body = serde_json::to_vec_pretty(state)?;

        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> StoreResult<()> {
            let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
            tmp.write_all(&body).map_err(|e| StoreError::io(tmp.path(), e))?;
            tmp.as_file().sync_all().map_err(|e| StoreError::io(tmp.path(), e))?;
            tmp.persist(&target).map_err(|e| StoreError::io(&target, e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("snapshot writer task failed: {}", e)))??;

        tracing::debug!(path = %path.display(), failsafe_mode = state.failsafe_mode, "State snapshot written");
        Ok(())
    }

    async fn read_state(&self, cluster_identifier: &str) -> StoreResult<Option<DaemonState>> {
        let path = self.snapshot_path(cluster_identifier);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}
