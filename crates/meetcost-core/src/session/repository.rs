//! Snapshot repository trait.
//!
//! Defines the interface for persisting the session between runs.

use async_trait::async_trait;

use super::model::Session;
use crate::error::Result;

/// A single durable slot holding the latest session snapshot.
///
/// This trait decouples the controller from the specific storage mechanism
/// (a JSON file, memory, ...). There is exactly one slot, identified by a fixed
/// key chosen by the implementation.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Schema versioning of the stored format
/// - Atomic replacement of the previous snapshot
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Reads the stored snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: A snapshot was found and decoded
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(_)`: The slot exists but could not be read or decoded
    async fn load(&self) -> Result<Option<Session>>;

    /// Replaces the stored snapshot with `session`.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored snapshot. Clearing an empty slot is not an error.
    async fn clear(&self) -> Result<()>;
}
