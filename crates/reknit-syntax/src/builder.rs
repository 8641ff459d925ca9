//! Incremental builder for the immutable syntax tree.

use text_size::{TextRange, TextSize};

use crate::tree::RawNode;
use crate::{NodeId, SyntaxKind, SyntaxTree};

struct Node {
    kind: SyntaxKind,
    full_start: TextSize,
    /// Trimmed range, known once the first token lands inside the node.
    range: Option<TextRange>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Builds a `SyntaxTree` from parser events.
pub struct Builder {
    text: Box<str>,
    nodes: Vec<Node>,
    opened: Vec<usize>,
    comments: Vec<TextRange>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_TREE_DEPTH: usize = 128;

impl Builder {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            comments: Vec::new(),
            text_len: TextSize::new(0),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let id = self.push(kind, None);
        self.opened.push(id.index());
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let node = self.opened.pop().expect("no opened nodes?");
        let node = &mut self.nodes[node];
        if node.range.is_none() {
            node.range = Some(TextRange::empty(self.text_len));
        }
    }

    /// Starts a list under the current node.
    pub fn start_list(&mut self) {
        self.start_node(SyntaxKind::SYNTAX_LIST);
    }

    /// Finishes the most recently started list.
    #[track_caller]
    pub fn finish_list(&mut self) {
        let last = *self.opened.last().expect("no opened nodes?");
        assert_eq!(
            self.nodes[last].kind,
            SyntaxKind::SYNTAX_LIST,
            "expected an opened list, found an opened node"
        );
        self.finish_node();
    }

    /// Adds a leaf token. `range` excludes trivia; the trivia between the
    /// previous token and this one becomes the token's leading trivia.
    pub fn token(&mut self, kind: SyntaxKind, range: TextRange) {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        assert!(range.start() >= self.text_len, "tokens must be pushed in source order");
        assert!(self.text.is_char_boundary(usize::from(range.end())));

        self.push(kind, Some(range));
        self.text_len = range.end();

        for &ancestor in &self.opened {
            let node = &mut self.nodes[ancestor];
            match &mut node.range {
                None => node.range = Some(range),
                Some(existing) => *existing = existing.cover(range),
            }
        }
    }

    /// Records a comment found in trivia.
    pub fn comment(&mut self, range: TextRange) {
        self.comments.push(range);
    }

    fn push(&mut self, kind: SyntaxKind, range: Option<TextRange>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let parent = self.opened.last().map(|&index| NodeId::new(index));
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(Node {
            kind,
            full_start: self.text_len,
            range,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty());
        assert!(!self.nodes.is_empty());

        let text = std::mem::take(&mut self.text);
        let text_len = TextSize::new(text.len().try_into().expect("text exceeds u32::MAX bytes"));

        let mut children = Vec::with_capacity(self.nodes.len());
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, node) in std::mem::take(&mut self.nodes).into_iter().enumerate() {
            let (full_start, range) = if index == 0 {
                // The root always spans the whole file.
                (TextSize::new(0), TextRange::up_to(text_len))
            } else {
                (node.full_start, node.range.unwrap_or_else(|| TextRange::empty(node.full_start)))
            };
            let children_start = children.len() as u32;
            children.extend_from_slice(&node.children);
            nodes.push(RawNode {
                kind: node.kind,
                full_start,
                range,
                parent: node.parent,
                children_start,
                children_len: node.children.len() as u32,
            });
        }

        let mut comments = std::mem::take(&mut self.comments);
        comments.sort_by_key(|range| range.start());

        SyntaxTree {
            text,
            nodes: nodes.into_boxed_slice(),
            children: children.into_boxed_slice(),
            comments: comments.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn empty_file_has_list_and_eof() {
        let mut builder = Builder::new("  ");
        builder.start_node(SOURCE_FILE);
        builder.start_list();
        builder.finish_list();
        builder.token(EOF, TextRange::empty(TextSize::new(2)));
        builder.finish_node();
        let tree = builder.finish();

        let root = tree.root();
        assert_eq!(root.range(), TextRange::up_to(TextSize::new(2)));
        let list = root.child(0).unwrap();
        assert_eq!(list.kind(), SYNTAX_LIST);
        assert!(list.is_empty());
        assert_eq!(root.child(1).map(|eof| eof.full_start()), Some(TextSize::new(0)));
    }

    #[test]
    #[should_panic(expected = "expected an opened list")]
    fn finish_list_on_node_panics() {
        let mut builder = Builder::new("");
        builder.start_node(SOURCE_FILE);
        builder.finish_list();
    }
}
