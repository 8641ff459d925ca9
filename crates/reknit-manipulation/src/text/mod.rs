//! Text side of an edit: pure functions from a file's old text to its new
//! text.
//!
//! Manipulators know nothing about wrappers. Whatever they need from the tree
//! is captured when they are constructed, so computing the new text only
//! depends on the old one.

use reknit_syntax::{TextRange, TextSize};

mod comma_list;
mod full;
mod insertion;
mod remove;
mod reorder;
mod rename;
mod unwrap;

pub use comma_list::CommaListInsertion;
pub use full::FullReplacement;
pub use insertion::Insertion;
pub use remove::{RemoveChildren, RemoveOptions};
pub(crate) use reorder::{lead_start, trail_end};
pub use reorder::{ChangeChildOrder, SiblingFormatting, statement_formatting};
pub use rename::{RenameLocation, RenameLocations};
pub use unwrap::Unwrap;

pub trait TextManipulator {
    fn new_text(&self, old: &str) -> Result<String, TextEditError>;

    /// An excerpt of `new_text` around the edit, shown when the new text no
    /// longer parses.
    fn error_snippet(&self, new_text: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextEditError {
    #[error("offset {offset:?} is past the end of a text of length {len:?}")]
    OutOfBounds { offset: TextSize, len: TextSize },
    #[error("offset {0:?} is not on a character boundary")]
    NotCharBoundary(TextSize),
    #[error("rename locations {first:?} and {second:?} overlap")]
    OverlappingLocations { first: TextRange, second: TextRange },
    #[error("cannot move item {from} to {to} in a list of {len}")]
    ReorderOutOfBounds { from: usize, to: usize, len: usize },
    #[error("no nodes were given to remove")]
    NothingToRemove,
    #[error("nodes to remove are not consecutive siblings")]
    NotConsecutive,
}

/// Context kept on either side of the edited lines in error snippets.
const SNIPPET_CONTEXT: usize = 100;

fn check_offset(text: &str, offset: TextSize) -> Result<usize, TextEditError> {
    let index = usize::from(offset);
    if index > text.len() {
        return Err(TextEditError::OutOfBounds { offset, len: TextSize::of(text) });
    }
    if !text.is_char_boundary(index) {
        return Err(TextEditError::NotCharBoundary(offset));
    }
    Ok(index)
}

/// Replaces `range` of `text` with `replacement`.
pub(crate) fn splice(text: &str, range: TextRange, replacement: &str) -> Result<String, TextEditError> {
    let start = check_offset(text, range.start())?;
    let end = check_offset(text, range.end())?;

    let mut new_text = String::with_capacity(text.len() - (end - start) + replacement.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(replacement);
    new_text.push_str(&text[end..]);
    Ok(new_text)
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Excerpt of `new_text` with the `len` bytes at `pos` set between
/// `-- START --` and `-- END --` lines.
///
/// The excerpt extends to the line breaks around the edit plus up to
/// [`SNIPPET_CONTEXT`] bytes on either side.
pub fn text_for_error(new_text: &str, pos: TextSize, len: TextSize) -> String {
    let pos = floor_boundary(new_text, pos.into());
    let end = ceil_boundary(new_text, pos + usize::from(len));

    let line_start = new_text[..pos].rfind('\n').unwrap_or(0);
    let line_end = new_text[end..].find('\n').map_or(new_text.len(), |offset| end + offset);
    let start = floor_boundary(new_text, line_start.saturating_sub(SNIPPET_CONTEXT));
    let stop = ceil_boundary(new_text, line_end + SNIPPET_CONTEXT);

    let mut snippet = String::new();
    snippet.push_str(&new_text[start..pos]);
    snippet.push_str("\n-- START --\n");
    snippet.push_str(&new_text[pos..end]);
    snippet.push_str("\n-- END --\n");
    snippet.push_str(&new_text[end..stop]);
    snippet
}

/// Byte offset where the line containing `offset` starts.
pub(crate) fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |newline| newline + 1)
}

/// The leading whitespace of the line containing `offset`.
pub(crate) fn indentation_at(text: &str, offset: usize) -> &str {
    let start = line_start(text, offset);
    let line = &text[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn splice_checks_offsets() {
        let range = TextRange::new(2.into(), 3.into());
        assert_eq!(splice("a; b;", range, "x").unwrap(), "a;xb;");
        assert_eq!(
            splice("a;", TextRange::new(1.into(), 5.into()), ""),
            Err(TextEditError::OutOfBounds { offset: 5.into(), len: 2.into() })
        );
        assert_eq!(
            splice("é", TextRange::empty(1.into()), "x"),
            Err(TextEditError::NotCharBoundary(1.into()))
        );
    }

    #[test]
    fn error_snippet_marks_the_edit() {
        let text = "first();\n{ a(); ))) }\nlast();";
        let snippet = text_for_error(text, 15.into(), 4.into());
        expect![[r#"
            first();
            { a();
            -- START --
             )))
            -- END --
             }
            last();"#]]
        .assert_eq(&snippet);
    }

    #[test]
    fn error_snippet_limits_context() {
        let text = format!("{}\nx;\n{}", "a".repeat(300), "b".repeat(300));
        let snippet = text_for_error(&text, 301.into(), 2.into());
        assert_eq!(snippet.len(), 101 + "\n-- START --\nx;\n-- END --\n".len() + 100);
        assert!(snippet.starts_with('a'));
        assert!(snippet.ends_with('b'));
    }

    #[test]
    fn indentation_of_line() {
        let text = "{\n    a();\n\tb();\n}";
        assert_eq!(indentation_at(text, 8), "    ");
        assert_eq!(indentation_at(text, 13), "\t");
        assert_eq!(indentation_at(text, 0), "");
    }
}
