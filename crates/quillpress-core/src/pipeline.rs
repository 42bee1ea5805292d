//! Write-path composition: repair -> validate -> normalize -> persist.
//!
//! Each function takes the store handle explicitly; there is no ambient
//! store state. Repair and validation failures are terminal and nothing is
//! persisted. Once a write reaches the store it commits or fails as a
//! whole document - there is no partial-field commit.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::PipelineError;
use crate::intake::normalize::{self, Reflow};
use crate::intake::{repair, schema};
use crate::ports::PostStore;

/// Run raw submitted text through the full create path.
pub async fn submit(
    store: &dyn PostStore,
    reflow: &dyn Reflow,
    raw: &str,
) -> Result<Post, PipelineError> {
    let value = repair::repair(raw)?;
    submit_value(store, reflow, &value).await
}

/// Create path for clients that already sent well-formed structured data.
pub async fn submit_value(
    store: &dyn PostStore,
    reflow: &dyn Reflow,
    value: &Value,
) -> Result<Post, PipelineError> {
    let draft = schema::validate_full(value)?;
    let draft = normalize::normalize_draft(draft, reflow);
    Ok(store.create(draft).await?)
}

/// Run raw submitted text through the update path for an existing record.
pub async fn revise(
    store: &dyn PostStore,
    reflow: &dyn Reflow,
    id: Uuid,
    raw: &str,
) -> Result<Option<Post>, PipelineError> {
    let value = repair::repair(raw)?;
    revise_value(store, reflow, id, &value).await
}

/// Update path for pre-parsed structured data.
pub async fn revise_value(
    store: &dyn PostStore,
    reflow: &dyn Reflow,
    id: Uuid,
    value: &Value,
) -> Result<Option<Post>, PipelineError> {
    let patch = schema::validate_partial(value)?;
    let patch = normalize::normalize_patch(patch, reflow);
    Ok(store.update(id, patch).await?)
}
