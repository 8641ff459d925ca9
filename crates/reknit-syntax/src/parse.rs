use reknit_errors::Diagnostic;

use crate::SyntaxTree;

/// Result of one full parse: the tree plus whatever syntax errors the parser
/// recovered from while building it.
#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn new(tree: SyntaxTree, diagnostics: Vec<Diagnostic>) -> Self {
        Self { tree, diagnostics }
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (SyntaxTree, Vec<Diagnostic>) {
        (self.tree, self.diagnostics)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("source text is {len} bytes, offsets are limited to u32::MAX")]
    TooLarge { len: usize },
    #[error("nesting exceeds the supported depth of {limit}")]
    TooDeep { limit: usize },
}

/// Produces a brand-new tree for a full file text. Implementations never
/// reuse nodes from earlier parses.
pub trait SourceParser {
    fn parse(&self, text: &str) -> Result<Parse, ParseFailure>;

    /// Best-effort syntax errors for `text`; empty when no tree can be built.
    fn syntactic_diagnostics(&self, text: &str) -> Vec<Diagnostic> {
        self.parse(text).map(|parse| parse.diagnostics).unwrap_or_default()
    }
}
