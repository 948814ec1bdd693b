//! In-memory SnapshotRepository.
//!
//! Keeps the serialized snapshot text rather than the `Session` itself, so
//! loading goes through the same decoding path as the file repository.

use async_trait::async_trait;
use meetcost_core::error::Result;
use meetcost_core::session::{Session, SnapshotRepository};
use tokio::sync::Mutex;

use crate::dto::{decode_snapshot, encode_snapshot};

#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    raw: Mutex<Option<String>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with arbitrary stored text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// The stored snapshot text, if any.
    pub async fn raw(&self) -> Option<String> {
        self.raw.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn load(&self) -> Result<Option<Session>> {
        match self.raw.lock().await.as_deref() {
            Some(raw) if !raw.trim().is_empty() => decode_snapshot(raw).map(Some),
            _ => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let json = encode_snapshot(session)?;
        *self.raw.lock().await = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.raw.lock().await = None;
        Ok(())
    }
}
