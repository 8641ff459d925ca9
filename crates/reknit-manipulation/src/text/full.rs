use super::{TextEditError, TextManipulator};

/// Replaces the whole file.
#[derive(Debug, Clone)]
pub struct FullReplacement {
    text: String,
}

impl FullReplacement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextManipulator for FullReplacement {
    fn new_text(&self, _old: &str) -> Result<String, TextEditError> {
        Ok(self.text.clone())
    }

    fn error_snippet(&self, new_text: &str) -> String {
        format!("[full replacement]\n{new_text}")
    }
}
