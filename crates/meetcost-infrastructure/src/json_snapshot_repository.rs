//! JSON file-based SnapshotRepository implementation.
//!
//! One file per snapshot key under the data directory, replaced atomically on
//! every save. Blocking file I/O runs on the blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use meetcost_core::error::{MeetcostError, Result};
use meetcost_core::session::{Session, SnapshotRepository};
use serde_json::Value;

use crate::dto::{decode_snapshot_value, encode_snapshot};
use crate::paths::MeetcostPaths;
use crate::storage::AtomicJsonFile;

/// A repository implementation that stores the session snapshot as JSON.
#[derive(Clone)]
pub struct JsonSnapshotRepository {
    file: Arc<AtomicJsonFile<Value>>,
}

impl JsonSnapshotRepository {
    /// Creates a repository writing to an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    /// Creates a repository for `key` under the resolved data directory.
    pub fn for_key(paths: &MeetcostPaths, key: &str) -> Result<Self> {
        Ok(Self::new(paths.snapshot_file(key)?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SnapshotRepository for JsonSnapshotRepository {
    async fn load(&self) -> Result<Option<Session>> {
        let file = Arc::clone(&self.file);
        let snapshot = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| MeetcostError::internal(format!("snapshot load task failed: {}", e)))??;

        snapshot.map(decode_snapshot_value).transpose()
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file = Arc::clone(&self.file);
        let snapshot: Value = serde_json::from_str(&encode_snapshot(session)?)?;
        tokio::task::spawn_blocking(move || file.save(&snapshot))
            .await
            .map_err(|e| MeetcostError::internal(format!("snapshot save task failed: {}", e)))??;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| MeetcostError::internal(format!("snapshot clear task failed: {}", e)))??;
        tracing::debug!(path = %self.file.path().display(), "snapshot cleared");
        Ok(())
    }
}
