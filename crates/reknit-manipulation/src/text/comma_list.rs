use reknit_syntax::SyntaxKind::COMMA;
use reknit_syntax::SyntaxNode;

use super::{Insertion, TextEditError, TextManipulator};

/// Inserts items into a comma separated list, adding the separators they
/// need.
///
/// Besides the text, it knows where the new children land among the list's
/// children, commas included, and how many there are.
#[derive(Debug, Clone)]
pub struct CommaListInsertion {
    insertion: Insertion,
    child_index: usize,
    delta: usize,
}

impl CommaListInsertion {
    /// `index` counts items, not commas, and is clamped to the item count.
    pub fn new(list: SyntaxNode<'_>, index: usize, texts: &[impl AsRef<str>]) -> Self {
        let items = list.children().filter(|child| child.kind() != COMMA).collect::<Vec<_>>();
        let trailing_comma = list.children().next_back().is_some_and(|last| last.kind() == COMMA);
        let joined = texts.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
        let count = texts.len();
        let index = index.min(items.len());

        let (insertion, child_index, delta) = match items.get(index) {
            _ if items.is_empty() => (Insertion::new(list.start(), joined), 0, (2 * count).saturating_sub(1)),
            Some(item) => (Insertion::new(item.start(), format!("{joined}, ")), 2 * index, 2 * count),
            None if trailing_comma => {
                let comma = list.children().next_back().map_or(list.end(), SyntaxNode::end);
                (Insertion::new(comma, format!(" {joined},")), 2 * items.len(), 2 * count)
            }
            None => {
                let last = items.last().map_or(list.end(), |item| item.end());
                (Insertion::new(last, format!(", {joined}")), 2 * items.len() - 1, 2 * count)
            }
        };

        Self { insertion, child_index, delta }
    }

    /// Index among the list's children of the first inserted child.
    pub fn child_index(&self) -> usize {
        self.child_index
    }

    /// Number of children the list gains, commas included.
    pub fn delta(&self) -> usize {
        self.delta
    }
}

impl TextManipulator for CommaListInsertion {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        self.insertion.new_text(old)
    }

    fn error_snippet(&self, new_text: &str) -> String {
        self.insertion.error_snippet(new_text)
    }
}
