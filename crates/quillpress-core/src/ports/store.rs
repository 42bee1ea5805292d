use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::StoreError;

/// Durable keyed storage for posts with store-generated identifiers.
///
/// Not-found is a normal outcome and comes back as `Ok(None)`; the error
/// channel is reserved for the store itself being unavailable. Concurrent
/// writes to the same id are last-write-wins - the store offers no
/// versioning or locking. Every call is a suspension point that can fail
/// independently of the pipeline stage that invoked it.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new record, assigning a fresh id and creation timestamp.
    /// Duplicate content is fine; only storage unavailability fails.
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Fetch one record by id.
    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Fetch every record. No ordering promise; display order is the
    /// caller's concern.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// Merge the present fields of `patch` into the existing record and
    /// write the whole document back.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Remove the record, returning its last-known value. Hard delete; the
    /// id is never reused.
    async fn delete(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
}
