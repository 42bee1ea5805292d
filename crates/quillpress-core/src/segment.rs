//! Read-side segmentation of stored content into display paragraphs.
//!
//! The inverse of the write-side reflow: stored content is plain text with
//! blank-line delimiters, split lazily at render time. Nothing is cached;
//! every read re-derives the blocks from the stored string.

/// Iterate the display paragraphs of a stored content string.
pub fn paragraphs(content: &str) -> Paragraphs<'_> {
    Paragraphs { rest: content }
}

/// Lazy paragraph iterator over borrowed content.
///
/// Restartable: `Clone` resumes from the current position, and calling
/// [`paragraphs`] again starts a fresh pass. Blocks come back trimmed and
/// never empty.
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            match find_delimiter(self.rest) {
                Some((start, end)) => {
                    let block = self.rest[..start].trim();
                    self.rest = &self.rest[end..];
                    if !block.is_empty() {
                        return Some(block);
                    }
                }
                None => {
                    let block = self.rest.trim();
                    self.rest = "";
                    if !block.is_empty() {
                        return Some(block);
                    }
                }
            }
        }
        None
    }
}

/// Byte range of the next run of two or more whitespace characters.
fn find_delimiter(text: &str) -> Option<(usize, usize)> {
    let mut iter = text.char_indices().peekable();
    while let Some((start, c)) = iter.next() {
        if !c.is_whitespace() {
            continue;
        }
        let mut end = start + c.len_utf8();
        let mut len = 1usize;
        while let Some(&(next_start, next)) = iter.peek() {
            if !next.is_whitespace() {
                break;
            }
            end = next_start + next.len_utf8();
            len += 1;
            iter.next();
        }
        if len >= 2 {
            return Some((start, end));
        }
    }
    None
}
