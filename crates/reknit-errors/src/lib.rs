use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

/// Renders every diagnostic against `text`, one after another.
pub fn format_diagnostics<'a>(
    diagnostics: &'a [Diagnostic],
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
) -> impl Display + 'a {
    FormatDiagnostics { diagnostics, renderer, path, text }
}

struct FormatDiagnostics<'a> {
    diagnostics: &'a [Diagnostic],
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
}

impl Display for FormatDiagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.diagnostics {
            writeln!(f, "{}", diagnostic.render(self.renderer, self.path, self.text))?;
        }
        Ok(())
    }
}
