use reknit_syntax::{TextRange, TextSize};

use super::{TextEditError, TextManipulator, splice, text_for_error};

/// Inserts `text` at `pos`, replacing the `replacing_length` bytes after it.
#[derive(Debug, Clone)]
pub struct Insertion {
    pos: TextSize,
    text: String,
    replacing_length: TextSize,
}

impl Insertion {
    pub fn new(pos: TextSize, text: impl Into<String>) -> Self {
        Self { pos, text: text.into(), replacing_length: TextSize::new(0) }
    }

    pub fn replacing(mut self, replacing_length: TextSize) -> Self {
        self.replacing_length = replacing_length;
        self
    }

    pub fn pos(&self) -> TextSize {
        self.pos
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn replacing_length(&self) -> TextSize {
        self.replacing_length
    }

    /// Where the inserted text ends in the new text.
    pub fn end(&self) -> TextSize {
        self.pos + TextSize::of(self.text.as_str())
    }
}

impl TextManipulator for Insertion {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        splice(old, TextRange::at(self.pos, self.replacing_length), &self.text)
    }

    fn error_snippet(&self, new_text: &str) -> String {
        text_for_error(new_text, self.pos, TextSize::of(self.text.as_str()))
    }
}
