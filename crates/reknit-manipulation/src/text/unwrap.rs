use reknit_syntax::SyntaxKind::STRING_LITERAL;
use reknit_syntax::{SyntaxNode, TextRange, TextSize};

use super::{TextEditError, TextManipulator, splice, text_for_error};

/// Replaces a node with the statements of its body, one indentation level
/// shallower.
#[derive(Debug, Clone)]
pub struct Unwrap {
    range: TextRange,
    replacement: String,
}

impl Unwrap {
    /// `None` when the node has no statement list.
    pub fn new(node: SyntaxNode<'_>, indent_width: usize) -> Option<Self> {
        let list = node.statement_list()?;
        let text = node.tree().text();
        let body = TextRange::new(list.full_start(), list.end());

        let strings = list
            .descendants()
            .into_iter()
            .filter(|descendant| descendant.kind() == STRING_LITERAL)
            .map(SyntaxNode::range)
            .collect::<Vec<_>>();
        let in_string = |offset: TextSize| strings.iter().any(|range| range.start() < offset && offset < range.end());

        let mut replacement = String::new();
        let mut offset = body.start();
        for line in text[body].split_inclusive('\n') {
            if in_string(offset) {
                replacement.push_str(line);
            } else {
                replacement.push_str(dedent(line, indent_width));
            }
            offset += TextSize::of(line);
        }

        Some(Self { range: node.range(), replacement: replacement.trim().to_owned() })
    }
}

/// Strips up to `width` columns of leading whitespace, counting tabs as four.
fn dedent(line: &str, width: usize) -> &str {
    let mut columns = 0;
    for (index, c) in line.char_indices() {
        if columns >= width {
            return &line[index..];
        }
        match c {
            ' ' => columns += 1,
            '\t' => columns += 4,
            _ => return &line[index..],
        }
    }
    line.trim_start_matches([' ', '\t'])
}

impl TextManipulator for Unwrap {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        splice(old, self.range, &self.replacement)
    }

    fn error_snippet(&self, new_text: &str) -> String {
        text_for_error(new_text, self.range.start(), TextSize::of(self.replacement.as_str()))
    }
}
