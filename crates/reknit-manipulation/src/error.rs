use std::fmt;

use camino::Utf8PathBuf;
use line_index::{LineCol, LineIndex, TextSize};
use reknit_project::NodeError;
use reknit_syntax::ParseFailure;

use crate::text::TextEditError;

#[derive(Debug, thiserror::Error)]
pub enum ManipulationError {
    #[error("manipulation error: a syntax error was inserted\n\n{diagnostics}\n{details}")]
    SyntaxErrorIntroduced { diagnostics: String, details: Box<ManipulationDetails> },
    #[error("manipulation error: {message}\n\n{details}")]
    Failed { message: String, details: Box<ManipulationDetails> },
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error(transparent)]
    InvalidEdit(#[from] TextEditError),
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

impl ManipulationError {
    /// Path and texts of the failed edit, when it got as far as producing a
    /// new text.
    pub fn details(&self) -> Option<&ManipulationDetails> {
        match self {
            Self::SyntaxErrorIntroduced { details, .. } | Self::Failed { details, .. } => Some(details),
            Self::Node(_) | Self::InvalidEdit(_) | Self::Parse(_) => None,
        }
    }
}

/// Everything needed to see what an edit tried to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulationDetails {
    pub path: Utf8PathBuf,
    pub old_text: String,
    pub new_text: String,
    /// Excerpt of the new text around the edit.
    pub snippet: String,
    /// Zero-based position in the new text of the first byte that differs
    /// from the old one.
    pub position: Option<LineCol>,
}

impl ManipulationDetails {
    pub fn new(path: Utf8PathBuf, old_text: String, new_text: String, snippet: String) -> Self {
        let position = first_difference(&old_text, &new_text).map(|offset| {
            let offset = TextSize::try_from(offset).unwrap_or(TextSize::new(u32::MAX));
            LineIndex::new(&new_text).line_col(offset)
        });
        Self { path, old_text, new_text, snippet, position }
    }
}

fn first_difference(old: &str, new: &str) -> Option<usize> {
    let common = old.bytes().zip(new.bytes()).take_while(|(old, new)| old == new).count();
    if common == old.len() && common == new.len() {
        return None;
    }
    let mut offset = common.min(new.len());
    while !new.is_char_boundary(offset) {
        offset -= 1;
    }
    Some(offset)
}

impl fmt::Display for ManipulationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- Details --")?;
        writeln!(f, "Path: {}", self.path)?;
        if let Some(position) = self.position {
            writeln!(f, "Position: {}:{}", position.line + 1, position.col + 1)?;
        }
        write!(f, "Text: {:?}", self.snippet)
    }
}
