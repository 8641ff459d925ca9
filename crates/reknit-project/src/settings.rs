/// Formatting choices used when edits synthesize new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulationSettings {
    /// Text for one level of indentation.
    pub indent: String,
    pub newline: String,
}

impl Default for ManipulationSettings {
    fn default() -> Self {
        Self { indent: "    ".to_owned(), newline: "\n".to_owned() }
    }
}

impl ManipulationSettings {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Width of one indentation level, counting a tab as four columns.
    pub fn indent_width(&self) -> usize {
        self.indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
    }
}
