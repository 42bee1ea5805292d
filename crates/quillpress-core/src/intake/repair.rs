//! Best-effort coercion of near-JSON text into parseable structured data.
//!
//! Client payloads routinely arrive mangled by copy-paste: typographic
//! quotes, literal `\n` sequences, uneven whitespace, hand-edited JSON with
//! unquoted keys or trailing commas. This stage cleans those artifacts up
//! before the schema validator ever sees the data.

use serde_json::Value;

use crate::error::RepairError;

/// Coerce raw submitted text into a JSON value.
///
/// Cleanup steps run in a fixed order: escaped newlines become real ones,
/// newlines become spaces, typographic quotes are straightened, whitespace
/// runs are collapsed (keeping the double-space paragraph signal), and the
/// result goes through a tolerant JSON read. Any parse failure after
/// cleanup is a single [`RepairError`] - the caller gets one terminal
/// "resend your input" signal, never a partial acceptance.
pub fn repair(raw: &str) -> Result<Value, RepairError> {
    let text = unescape_newlines(raw);
    let text = flatten_newlines(&text);
    let text = straighten_quotes(&text);
    let text = collapse_whitespace(&text);
    let text = tolerate_json(&text);
    serde_json::from_str(&text).map_err(|err| RepairError {
        reason: err.to_string(),
    })
}

/// Literal two-character `\n` sequences become actual newlines.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Each newline becomes a single space. Paragraph intent arrives as
/// consecutive newlines, which this turns into a multi-space run for
/// [`collapse_whitespace`] to fold into the double-space boundary marker.
fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', " ")
}

/// Typographic quotes become their straight ASCII forms.
fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Collapse whitespace runs without destroying paragraph boundaries.
///
/// A run of two or more whitespace characters is the intake convention for
/// "paragraph break", so it folds to exactly two spaces instead of one.
/// A single whitespace character becomes one plain space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            let mut run = 1usize;
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
                run += 1;
            }
            out.push(' ');
            if run >= 2 {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrite the two JSON sloppinesses worth tolerating - unquoted object
/// keys and trailing commas - into strict JSON for `serde_json`.
///
/// The scanner tracks string state so content inside quoted values is never
/// touched. Anything it cannot make sense of is left as-is and surfaces as
/// a parse error from the strict parser.
fn tolerate_json(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                // A comma whose next significant character closes the
                // container is trailing - drop it.
                if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
                    i += 1;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
            c if is_key_start(c) && at_key_position(&out) => {
                let start = i;
                while i < chars.len() && is_key_char(chars[i]) {
                    i += 1;
                }
                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ':' {
                    out.push('"');
                    out.extend(chars[start..i].iter());
                    out.push('"');
                } else {
                    out.extend(chars[start..i].iter());
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// A bare identifier can only be an object key right after `{` or a
/// separating `,`.
fn at_key_position(written: &str) -> bool {
    matches!(written.trim_end().chars().last(), Some('{' | ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_json_unchanged() {
        let value = repair(r#"{"title": "Hi", "author": "jo"}"#).unwrap();
        assert_eq!(value["title"], "Hi");
        assert_eq!(value["author"], "jo");
    }

    #[test]
    fn straightens_typographic_quotes() {
        let value = repair("{\u{201C}title\u{201D}: \u{201C}Hi\u{201D}}").unwrap();
        assert_eq!(value["title"], "Hi");
    }

    #[test]
    fn curly_single_quotes_become_apostrophes() {
        let value = repair("{\"title\": \"It\u{2019}s fine\"}").unwrap();
        assert_eq!(value["title"], "It's fine");
    }

    #[test]
    fn unescapes_literal_newline_sequences() {
        let value = repair(r#"{"content": "line one\nline two"}"#).unwrap();
        assert_eq!(value["content"], "line one line two");
    }

    #[test]
    fn preserves_paragraph_boundary_as_double_space() {
        let value = repair(r#"{"content": "para one.\n\npara two"}"#).unwrap();
        assert_eq!(value["content"], "para one.  para two");
    }

    #[test]
    fn long_whitespace_runs_fold_to_one_boundary() {
        let value = repair(r#"{"content": "a     b"}"#).unwrap();
        assert_eq!(value["content"], "a  b");
    }

    #[test]
    fn quotes_bare_keys() {
        let value = repair(r#"{title: "Hi", tags: ["a", "b"]}"#).unwrap();
        assert_eq!(value["title"], "Hi");
        assert_eq!(value["tags"][1], "b");
    }

    #[test]
    fn drops_trailing_commas() {
        let value = repair(r#"{"title": "Hi", "tags": ["a",],}"#).unwrap();
        assert_eq!(value["tags"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn bare_literals_in_value_position_are_untouched() {
        let value = repair(r#"{flag: true, nothing: null}"#).unwrap();
        assert_eq!(value["flag"], true);
        assert!(value["nothing"].is_null());
    }

    #[test]
    fn unparseable_text_is_a_repair_error() {
        let err = repair("this is not structured data").unwrap_err();
        assert!(!err.reason.is_empty());
    }
}
