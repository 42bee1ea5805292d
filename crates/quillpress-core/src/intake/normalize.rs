//! Deterministic normalization applied between validation and persistence.
//!
//! Reflow turns free-form submitted text into the canonical stored form:
//! blank-line-delimited paragraphs in a single string. Image normalization
//! guarantees a stored image reference always carries a recognized scheme.
//! Neither transform can fail; unusual input degrades to a single paragraph
//! or an absent image rather than an error.

use crate::domain::{PostDraft, PostPatch};

/// Pluggable paragraph-reflow strategy.
///
/// The default heuristic is deliberately naive; isolating it behind a trait
/// means a smarter boundary detector can replace it without touching the
/// rest of the pipeline.
pub trait Reflow: Send + Sync {
    /// Rewrite submitted content into delimiter-separated paragraphs.
    fn reflow(&self, content: &str) -> String;
}

/// Sentence-boundary reflow: a period followed by spaces starts a new
/// paragraph.
///
/// The rule does not understand abbreviations, decimal numbers, or quoted
/// sentences - "Dr. Smith" becomes two paragraphs. That trade-off is the
/// established contract for stored content, not an oversight to fix here.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceReflow;

impl Reflow for SentenceReflow {
    fn reflow(&self, content: &str) -> String {
        let joined = join_soft_wraps(content);
        delimit_paragraphs(&joined).trim().to_string()
    }
}

/// A lone newline is a soft wrap and becomes a space; consecutive newlines
/// are a deliberate break and stay.
fn join_soft_wraps(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            let prev_nl = i > 0 && chars[i - 1] == '\n';
            let next_nl = i + 1 < chars.len() && chars[i + 1] == '\n';
            if prev_nl || next_nl {
                out.push('\n');
            } else {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Insert the stored paragraph delimiter (a blank line).
///
/// Two triggers: a period followed by one or more spaces (the sentence
/// heuristic), and any surviving run of two or more spaces (the intake
/// boundary marker). Stored content therefore never contains the raw
/// double-space delimiter.
fn delimit_paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '.' if chars.peek() == Some(&' ') => {
                while chars.peek() == Some(&' ') {
                    chars.next();
                }
                out.push('.');
                out.push_str("\n\n");
            }
            ' ' if chars.peek() == Some(&' ') => {
                while chars.peek() == Some(&' ') {
                    chars.next();
                }
                out.push_str("\n\n");
            }
            _ => out.push(c),
        }
    }
    out
}

/// Recognized terminal forms for a stored image reference.
const IMAGE_SCHEMES: [&str; 3] = ["data:image/", "http://", "https://"];

/// Prefix-based image normalization.
///
/// A non-empty value with no recognized scheme is assumed to be a bare
/// base64 JPEG payload; no validation of the payload itself is attempted.
/// An empty value degrades to "absent". Idempotent: an already-prefixed
/// value passes through unchanged.
pub fn normalize_image(image: String) -> Option<String> {
    if image.is_empty() {
        return None;
    }
    if IMAGE_SCHEMES.iter().any(|scheme| image.starts_with(scheme)) {
        return Some(image);
    }
    Some(format!("data:image/jpeg;base64,{image}"))
}

/// Apply reflow and image normalization to a validated draft.
pub fn normalize_draft(draft: PostDraft, reflow: &dyn Reflow) -> PostDraft {
    let PostDraft {
        title,
        content,
        author,
        image,
        tags,
    } = draft;

    PostDraft {
        title,
        content: reflow.reflow(&content),
        author,
        image: image.and_then(normalize_image),
        tags,
    }
}

/// Apply reflow and image normalization to the fields a patch carries.
pub fn normalize_patch(patch: PostPatch, reflow: &dyn Reflow) -> PostPatch {
    let PostPatch {
        title,
        content,
        author,
        image,
        tags,
    } = patch;

    PostPatch {
        title,
        content: content.map(|text| reflow.reflow(&text)),
        author,
        image: image.and_then(normalize_image),
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflow(content: &str) -> String {
        SentenceReflow.reflow(content)
    }

    #[test]
    fn splits_sentences_into_paragraphs() {
        assert_eq!(reflow("Hello. World. Done."), "Hello.\n\nWorld.\n\nDone.");
    }

    #[test]
    fn joins_soft_wrapped_lines() {
        assert_eq!(reflow("one\ntwo\nthree"), "one two three");
    }

    #[test]
    fn keeps_deliberate_blank_lines() {
        assert_eq!(reflow("one\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn intake_double_space_becomes_the_stored_delimiter() {
        assert_eq!(reflow("para one.  para two"), "para one.\n\npara two");
        assert_eq!(reflow("hello  world"), "hello\n\nworld");
    }

    #[test]
    fn content_without_boundaries_is_a_single_paragraph() {
        assert_eq!(reflow("no boundaries here"), "no boundaries here");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(reflow("  padded. "), "padded.");
    }

    #[test]
    fn abbreviations_false_trigger_by_design() {
        assert_eq!(reflow("Dr. Smith arrived."), "Dr.\n\nSmith arrived.");
    }

    #[test]
    fn bare_base64_gets_the_jpeg_prefix() {
        assert_eq!(
            normalize_image("/9j/4AAQSkZJRg==".to_string()),
            Some("data:image/jpeg;base64,/9j/4AAQSkZJRg==".to_string())
        );
    }

    #[test]
    fn image_normalization_is_idempotent() {
        let once = normalize_image("/9j/4AAQSkZJRg==".to_string()).unwrap();
        let twice = normalize_image(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn external_urls_pass_through() {
        assert_eq!(
            normalize_image("https://example.com/a.png".to_string()),
            Some("https://example.com/a.png".to_string())
        );
    }

    #[test]
    fn empty_image_degrades_to_absent() {
        assert_eq!(normalize_image(String::new()), None);
    }

    #[test]
    fn patch_normalization_touches_only_present_fields() {
        let patch = PostPatch {
            content: Some("a. b".to_string()),
            image: Some("abc123".to_string()),
            ..PostPatch::default()
        };

        let patch = normalize_patch(patch, &SentenceReflow);
        assert_eq!(patch.content, Some("a.\n\nb".to_string()));
        assert_eq!(patch.image, Some("data:image/jpeg;base64,abc123".to_string()));
        assert_eq!(patch.title, None);
    }
}
