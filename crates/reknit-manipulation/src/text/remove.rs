use reknit_syntax::{TextRange, TextSize};

use super::{TextEditError, TextManipulator, check_offset, splice, text_for_error};

/// Whitespace trimmed around removed text, and what takes its place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    pub preceding_spaces: bool,
    pub following_spaces: bool,
    /// Trims newlines too; implies `preceding_spaces`.
    pub preceding_newlines: bool,
    /// Trims newlines too; implies `following_spaces`.
    pub following_newlines: bool,
    pub replace_trivia: Option<String>,
}

/// Removes a contiguous run of text, usually the full range of one or more
/// sibling nodes.
#[derive(Debug, Clone)]
pub struct RemoveChildren {
    range: TextRange,
    options: RemoveOptions,
}

impl RemoveChildren {
    pub fn new(range: TextRange) -> Self {
        Self { range, options: RemoveOptions::default() }
    }

    pub fn with_options(mut self, options: RemoveOptions) -> Self {
        self.options = options;
        self
    }

    /// The range actually removed from `text` once whitespace is trimmed.
    pub fn expanded_range(&self, text: &str) -> Result<TextRange, TextEditError> {
        let mut start = check_offset(text, self.range.start())?;
        let mut end = check_offset(text, self.range.end())?;
        let options = &self.options;

        if options.preceding_newlines {
            start = text[..start].trim_end().len();
        } else if options.preceding_spaces {
            start = text[..start].trim_end_matches([' ', '\t']).len();
        }

        if options.following_newlines {
            end = text.len() - text[end..].trim_start().len();
        } else if options.following_spaces {
            end = text.len() - text[end..].trim_start_matches([' ', '\t']).len();
        }

        Ok(TextRange::new(TextSize::of(&text[..start]), TextSize::of(&text[..end])))
    }
}

impl TextManipulator for RemoveChildren {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        let range = self.expanded_range(old)?;
        splice(old, range, self.options.replace_trivia.as_deref().unwrap_or_default())
    }

    fn error_snippet(&self, new_text: &str) -> String {
        let inserted = self.options.replace_trivia.as_deref().map_or(TextSize::new(0), TextSize::of);
        text_for_error(new_text, self.range.start(), inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn removes_exact_range() {
        let remove = RemoveChildren::new(range(1, 6));
        assert_eq!(remove.new_text("{ a(); b(); }").unwrap(), "{ b(); }");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let text = "a();\n  \n  b();\nc();";
        let remove = RemoveChildren::new(range(10, 14)).with_options(RemoveOptions {
            preceding_newlines: true,
            ..RemoveOptions::default()
        });
        assert_eq!(remove.new_text(text).unwrap(), "a();\nc();");

        let remove = RemoveChildren::new(range(0, 4)).with_options(RemoveOptions {
            following_spaces: true,
            ..RemoveOptions::default()
        });
        assert_eq!(remove.new_text("a();   b();").unwrap(), "b();");
    }

    #[test]
    fn replaces_with_trivia() {
        let remove = RemoveChildren::new(range(3, 5)).with_options(RemoveOptions {
            preceding_spaces: true,
            following_spaces: true,
            replace_trivia: Some("\n".to_owned()),
            ..RemoveOptions::default()
        });
        assert_eq!(remove.new_text("a; b; c;").unwrap(), "a;\nc;");
    }
}
