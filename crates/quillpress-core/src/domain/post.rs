use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a published article as stored.
///
/// `content` is held in normalized form: a single string with blank-line
/// paragraph delimiters, never a list. `image` is either a full data URI or
/// an external URL once it has passed through the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// A validated, normalized payload waiting for its first persistence.
///
/// Carries no `id` or `created_at` - the store assigns both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// A validated partial payload for updates.
///
/// Absent fields leave the stored record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Post {
    /// Materialize a draft into a stored record with a fresh identity.
    ///
    /// Identifiers are v4 UUIDs; a deleted record's id is never handed out
    /// again.
    pub fn from_draft(draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            author: draft.author,
            image: draft.image,
            tags: draft.tags,
            created_at: Utc::now(),
        }
    }

    /// Merge a patch into this record.
    ///
    /// Only fields present in the patch are replaced; `id` and `created_at`
    /// are not reachable from a patch at all.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(tags) = patch.tags {
            self.tags = Some(tags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "First".to_string(),
            content: "Hello.".to_string(),
            author: "jo".to_string(),
            image: None,
            tags: Some(vec!["intro".to_string()]),
        }
    }

    #[test]
    fn apply_replaces_only_present_fields() {
        let mut post = Post::from_draft(draft());
        let created_at = post.created_at;

        post.apply(PostPatch {
            title: Some("Second".to_string()),
            ..PostPatch::default()
        });

        assert_eq!(post.title, "Second");
        assert_eq!(post.content, "Hello.");
        assert_eq!(post.author, "jo");
        assert_eq!(post.tags, Some(vec!["intro".to_string()]));
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut post = Post::from_draft(draft());
        let before = post.clone();

        post.apply(PostPatch::default());

        assert_eq!(post, before);
    }
}
