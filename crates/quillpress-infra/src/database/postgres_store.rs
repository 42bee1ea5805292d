//! PostgreSQL implementation of the post store.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait};
use uuid::Uuid;

use quillpress_core::domain::{Post, PostDraft, PostPatch};
use quillpress_core::error::StoreError;
use quillpress_core::ports::PostStore;

use super::entity::post::{ActiveModel, Entity as PostEntity};

/// SeaORM-backed post store.
pub struct PostgresPostStore {
    db: Arc<DbConn>,
}

impl PostgresPostStore {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

fn store_err(err: DbErr) -> StoreError {
    match err {
        DbErr::Conn(e) => StoreError::Connection(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post::from_draft(draft);
        let model = ActiveModel::from(post.clone());
        model.insert(self.db.as_ref()).await.map_err(store_err)?;

        tracing::debug!(post_id = %post.id, "Post inserted");
        Ok(post)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let found = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(store_err)?;

        Ok(found.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let rows = PostEntity::find().all(self.db.as_ref()).await.map_err(store_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        // Read-merge-write; the merged document is written back whole.
        let Some(mut merged) = self.get(id).await? else {
            return Ok(None);
        };
        merged.apply(patch);

        let model = ActiveModel::from(merged.clone());
        model.update(self.db.as_ref()).await.map_err(store_err)?;

        Ok(Some(merged))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(store_err)?;

        Ok(Some(existing))
    }
}
