use reknit_project::Node;
use reknit_syntax::{NodeId, SyntaxNode, TextSize};

use crate::text::TextManipulator;

/// Pairs a wrapper with a node of the new tree directly, for changes the
/// positional walk cannot express. Called with the new counterpart of the
/// changing parent.
pub type CustomMappings = Box<dyn Fn(SyntaxNode<'_>) -> Vec<(Node, NodeId)>>;

/// What the text change does structurally. Selects the handler that pairs the
/// old tree with the new one.
pub enum EditKind {
    /// Children inserted (`delta > 0`) or removed (`delta < 0`) at `index` of
    /// `parent`. Wrappers in `replacing` are forgotten where they are met,
    /// without counting towards `delta`.
    ChildIndex {
        parent: Node,
        index: usize,
        delta: isize,
        replacing: Vec<Node>,
        custom_mappings: Option<CustomMappings>,
    },
    /// New text occupying `start..end` among the direct children of `parent`,
    /// replacing `replacing_length` bytes of old text.
    ParentRange {
        parent: Node,
        start: TextSize,
        end: TextSize,
        replacing_length: Option<TextSize>,
        replacing: Vec<Node>,
        custom_mappings: Option<CustomMappings>,
    },
    /// Like `ParentRange`, but the new text may land at any depth below
    /// `parent`.
    Range { parent: Node, start: TextSize, end: TextSize, replacing_length: TextSize },
    /// The list item at `old_index` of `parent` moved to `new_index`. Indices
    /// skip separators.
    ChildOrder { parent: Node, old_index: usize, new_index: usize },
    /// `node` was replaced by the statements of its body.
    Unwrap { node: Node },
    /// Identifiers changed text, possibly turning shorthand properties and
    /// bare specifiers into their long forms.
    Rename,
    /// The new tree has exactly the shape of the old one.
    Straight,
    /// Anything else; wrappers that cannot be matched are forgotten.
    BestEffort,
}

impl EditKind {
    pub fn child_index(parent: Node, index: usize, delta: isize) -> Self {
        Self::ChildIndex { parent, index, delta, replacing: Vec::new(), custom_mappings: None }
    }
}

/// A text change together with its structural classification.
pub struct Edit {
    pub text: Box<dyn TextManipulator>,
    pub kind: EditKind,
}

impl Edit {
    pub fn new(text: impl TextManipulator + 'static, kind: EditKind) -> Self {
        Self { text: Box::new(text), kind }
    }
}
