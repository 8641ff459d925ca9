use reknit_syntax::{TextRange, TextSize};

use super::{TextEditError, TextManipulator, floor_boundary, splice};

/// One occurrence of a renamed name. `prefix` and `suffix` wrap the new
/// name, for occurrences that have to keep the old name visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameLocation {
    pub range: TextRange,
    pub prefix: String,
    pub suffix: String,
}

impl RenameLocation {
    pub fn new(range: TextRange) -> Self {
        Self { range, prefix: String::new(), suffix: String::new() }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Replaces every location with the new name in one pass.
#[derive(Debug, Clone)]
pub struct RenameLocations {
    locations: Vec<RenameLocation>,
    new_name: String,
}

impl RenameLocations {
    pub fn new(mut locations: Vec<RenameLocation>, new_name: impl Into<String>) -> Self {
        locations.sort_by_key(|location| std::cmp::Reverse(location.range.start()));
        Self { locations, new_name: new_name.into() }
    }
}

impl TextManipulator for RenameLocations {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        for pair in self.locations.windows(2) {
            let (later, earlier) = (&pair[0], &pair[1]);
            if earlier.range.end() > later.range.start() {
                return Err(TextEditError::OverlappingLocations { first: earlier.range, second: later.range });
            }
        }

        // Back to front, so earlier offsets stay valid.
        let mut text = old.to_owned();
        for location in &self.locations {
            let replacement = format!("{}{}{}", location.prefix, self.new_name, location.suffix);
            text = splice(&text, location.range, &replacement)?;
        }
        Ok(text)
    }

    fn error_snippet(&self, new_text: &str) -> String {
        let start = self.locations.last().map_or(TextSize::new(0), |location| location.range.start());
        format!("...{}", &new_text[floor_boundary(new_text, start.into())..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: u32, len: u32) -> TextRange {
        TextRange::at(start.into(), len.into())
    }

    #[test]
    fn replaces_back_to_front() {
        let text = "let a = 1;\nf(a, { a });";
        let rename = RenameLocations::new(
            vec![
                RenameLocation::new(at(4, 1)),
                RenameLocation::new(at(13, 1)),
                RenameLocation::new(at(18, 1)).with_prefix("a: "),
            ],
            "value",
        );
        assert_eq!(rename.new_text(text).unwrap(), "let value = 1;\nf(value, { a: value });");
        assert_eq!(rename.error_snippet("let value = 1;"), "...value = 1;");
    }

    #[test]
    fn suffix_keeps_exported_name() {
        let rename = RenameLocations::new(vec![RenameLocation::new(at(9, 1)).with_suffix(" as a")], "b");
        assert_eq!(rename.new_text("export { a };").unwrap(), "export { b as a };");
    }

    #[test]
    fn overlapping_locations_are_rejected() {
        let rename = RenameLocations::new(vec![RenameLocation::new(at(0, 3)), RenameLocation::new(at(2, 2))], "x");
        assert_eq!(
            rename.new_text("abcdef"),
            Err(TextEditError::OverlappingLocations { first: at(0, 3), second: at(2, 2) })
        );
    }
}
