//! In-memory post store - the default when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quillpress_core::domain::{Post, PostDraft, PostPatch};
use quillpress_core::error::StoreError;
use quillpress_core::ports::PostStore;

/// Keyed in-memory collection behind an async RwLock.
///
/// This is the fallback implementation when Postgres is not available.
/// Note: Data is lost on process restart. Identifiers are v4 UUIDs and are
/// never reused after a delete.
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post::from_draft(draft);
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        tracing::debug!(post_id = %post.id, "Post stored in memory");
        Ok(post)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&id) {
            Some(post) => {
                post.apply(patch);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id))
    }
}
