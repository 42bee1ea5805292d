//! Data Transfer Objects - wire shapes for the API.

use serde::{Deserialize, Serialize};

/// A stored post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// RFC 3339 creation timestamp, assigned by the store.
    pub created_at: String,
}

/// A single post plus its display segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    /// Content re-segmented into display paragraphs at read time.
    pub paragraphs: Vec<String>,
}
