//! Shape validation for the post payload.
//!
//! Full mode backs creation: `title`, `content`, `author` required and
//! non-empty. Partial mode backs updates: everything optional, but a
//! present field is held to the same constraint as in full mode.
//! Unrecognized fields are dropped rather than rejected.

use serde_json::{Map, Value};

use crate::domain::{PostDraft, PostPatch};
use crate::error::{FieldError, FieldReason, ValidationError};

/// Validate a full create payload into a draft.
pub fn validate_full(value: &Value) -> Result<PostDraft, ValidationError> {
    let map = as_object(value)?;
    let mut errors = Vec::new();

    let title = required_text(map, "title", &mut errors);
    let content = required_text(map, "content", &mut errors);
    let author = required_text(map, "author", &mut errors);
    let image = optional_text(map, "image", &mut errors);
    let tags = optional_tags(map, &mut errors);

    match (title, content, author) {
        (Some(title), Some(content), Some(author)) if errors.is_empty() => Ok(PostDraft {
            title,
            content,
            author,
            image,
            tags,
        }),
        _ => Err(ValidationError { errors }),
    }
}

/// Validate a partial update payload into a patch.
pub fn validate_partial(value: &Value) -> Result<PostPatch, ValidationError> {
    let map = as_object(value)?;
    let mut errors = Vec::new();

    let patch = PostPatch {
        title: present_text(map, "title", &mut errors),
        content: present_text(map, "content", &mut errors),
        author: present_text(map, "author", &mut errors),
        image: optional_text(map, "image", &mut errors),
        tags: optional_tags(map, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError { errors })
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| ValidationError {
        errors: vec![FieldError {
            field: "$".to_string(),
            reason: FieldReason::WrongType { expected: "object" },
        }],
    })
}

/// Required non-empty string. Missing, null, wrong-typed, and empty values
/// each get their own reason.
fn required_text(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(field) {
        None => {
            errors.push(FieldError {
                field: field.to_string(),
                reason: FieldReason::Missing,
            });
            None
        }
        Some(value) => check_text(value, field, errors),
    }
}

/// Like [`required_text`], except absence is fine.
fn present_text(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    map.get(field)
        .and_then(|value| check_text(value, field, errors))
}

fn check_text(value: &Value, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => {
            errors.push(FieldError {
                field: field.to_string(),
                reason: FieldReason::Empty,
            });
            None
        }
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.push(FieldError {
                field: field.to_string(),
                reason: FieldReason::WrongType { expected: "string" },
            });
            None
        }
    }
}

/// Optional string field. Emptiness is tolerated here; the normalizer
/// degrades an empty image to "absent".
fn optional_text(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError {
                field: field.to_string(),
                reason: FieldReason::WrongType { expected: "string" },
            });
            None
        }
    }
}

/// Optional ordered list of string labels. No uniqueness or vocabulary
/// constraint.
fn optional_tags(map: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Vec<String>> {
    let wrong_type = |errors: &mut Vec<FieldError>| {
        errors.push(FieldError {
            field: "tags".to_string(),
            reason: FieldReason::WrongType {
                expected: "array of strings",
            },
        });
        None
    };

    match map.get("tags") {
        None => None,
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => tags.push(s.clone()),
                    _ => return wrong_type(errors),
                }
            }
            Some(tags)
        }
        Some(_) => wrong_type(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_a_complete_payload() {
        let value = json!({
            "title": "Hi",
            "content": "Hello.",
            "author": "jo",
            "image": "https://example.com/a.png",
            "tags": ["intro", "meta"],
        });

        let draft = validate_full(&value).unwrap();
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.tags, Some(vec!["intro".to_string(), "meta".to_string()]));
    }

    #[test]
    fn names_every_missing_required_field() {
        let err = validate_full(&json!({"title": "Hi"})).unwrap_err();

        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["content", "author"]);
        assert!(err.errors.iter().all(|e| e.reason == FieldReason::Missing));
    }

    #[test]
    fn rejects_empty_required_strings() {
        let value = json!({"title": "", "content": "x", "author": "jo"});
        let err = validate_full(&value).unwrap_err();

        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "title");
        assert_eq!(err.errors[0].reason, FieldReason::Empty);
    }

    #[test]
    fn rejects_wrong_types_with_the_expected_type() {
        let value = json!({"title": 7, "content": "x", "author": "jo", "tags": "nope"});
        let err = validate_full(&value).unwrap_err();

        assert_eq!(err.errors[0].field, "title");
        assert_eq!(
            err.errors[0].reason,
            FieldReason::WrongType { expected: "string" }
        );
        assert_eq!(err.errors[1].field, "tags");
    }

    #[test]
    fn null_is_a_wrong_type_not_a_missing_field() {
        let value = json!({"title": null, "content": "x", "author": "jo"});
        let err = validate_full(&value).unwrap_err();

        assert_eq!(
            err.errors[0].reason,
            FieldReason::WrongType { expected: "string" }
        );
    }

    #[test]
    fn drops_unrecognized_fields() {
        let value = json!({
            "title": "Hi",
            "content": "x",
            "author": "jo",
            "visibility": "public",
        });

        assert!(validate_full(&value).is_ok());
    }

    #[test]
    fn rejects_a_non_object_document() {
        let err = validate_full(&json!(["not", "a", "post"])).unwrap_err();
        assert_eq!(err.errors[0].field, "$");
    }

    #[test]
    fn partial_mode_allows_any_subset() {
        let patch = validate_partial(&json!({"title": "New"})).unwrap();
        assert_eq!(patch.title, Some("New".to_string()));
        assert_eq!(patch.content, None);
        assert_eq!(patch.author, None);
    }

    #[test]
    fn partial_mode_still_rejects_empty_present_fields() {
        let err = validate_partial(&json!({"content": ""})).unwrap_err();
        assert_eq!(err.errors[0].field, "content");
        assert_eq!(err.errors[0].reason, FieldReason::Empty);
    }

    #[test]
    fn repaired_text_round_trips_through_validation() {
        let raw = "{title: \u{201C}Hi\u{201D}, content: \"one.\\n\\ntwo\", author: \"jo\",}";
        let value = crate::intake::repair::repair(raw).unwrap();

        let draft = validate_full(&value).unwrap();
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.content, "one.  two");
    }
}
