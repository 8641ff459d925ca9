//! Arena storage for one parse and the borrowed handles used to navigate it.

use std::fmt::{self, Write as _};

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// Index of a node inside one [`SyntaxTree`].
///
/// Ids are assigned in preorder, so the root is always [`NodeId::ROOT`] and a
/// parent's id is smaller than any of its descendants'.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index.try_into().expect("tree exceeds u32::MAX nodes"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) struct RawNode {
    pub(crate) kind: SyntaxKind,
    pub(crate) full_start: TextSize,
    pub(crate) range: TextRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
}

/// Owned syntax tree for a single source text.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Box<[RawNode]>,
    pub(crate) children: Box<[NodeId]>,
    pub(crate) comments: Box<[TextRange]>,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(NodeId::ROOT)
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        debug_assert!(id.index() < self.nodes.len(), "{id:?} does not belong to this tree");
        SyntaxNode { tree: self, id }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ranges of every comment in the file, in source order.
    pub fn comments(&self) -> &[TextRange] {
        &self.comments
    }

    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        dump(&mut out, self.root(), 0);
        out
    }

    #[inline]
    fn raw(&self, id: NodeId) -> &RawNode {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text.len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

fn dump(out: &mut String, node: SyntaxNode<'_>, depth: usize) {
    let indent = depth * 2;
    if node.is_token() {
        _ = writeln!(out, "{:indent$}{node:?} {:?}", "", node.text());
    } else {
        _ = writeln!(out, "{:indent$}{node:?}", "");
        for child in node.children() {
            dump(out, child, depth + 1);
        }
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.raw(self.id).kind
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self.kind().is_token()
    }

    /// Range without leading trivia.
    #[inline]
    pub fn range(self) -> TextRange {
        self.tree.raw(self.id).range
    }

    #[inline]
    pub fn start(self) -> TextSize {
        self.range().start()
    }

    #[inline]
    pub fn end(self) -> TextSize {
        self.range().end()
    }

    /// Start of the node including the trivia in front of it.
    #[inline]
    pub fn full_start(self) -> TextSize {
        self.tree.raw(self.id).full_start
    }

    #[inline]
    pub fn full_range(self) -> TextRange {
        TextRange::new(self.full_start(), self.end())
    }

    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.range()]
    }

    #[inline]
    pub fn parent(self) -> Option<Self> {
        self.tree.raw(self.id).parent.map(|id| self.tree.node(id))
    }

    #[inline]
    pub fn child_ids(self) -> &'a [NodeId] {
        let raw = self.tree.raw(self.id);
        let start = raw.children_start as usize;
        &self.tree.children[start..start + raw.children_len as usize]
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.child_ids().iter().map(move |&id| tree.node(id))
    }

    pub fn child(self, index: usize) -> Option<Self> {
        self.child_ids().get(index).map(|&id| self.tree.node(id))
    }

    pub fn child_of_kind(self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// The first `SYNTAX_LIST` child.
    pub fn child_syntax_list(self) -> Option<Self> {
        self.child_of_kind(SyntaxKind::SYNTAX_LIST)
    }

    /// The statements of a source file, a block, or a declaration with a
    /// block body.
    pub fn statement_list(self) -> Option<Self> {
        match self.kind() {
            SyntaxKind::SOURCE_FILE | SyntaxKind::BLOCK => {
                self.child_of_kind(SyntaxKind::SYNTAX_LIST)
            }
            _ => self.child_of_kind(SyntaxKind::BLOCK)?.statement_list(),
        }
    }

    pub fn index_in_parent(self) -> Option<usize> {
        let parent = self.parent()?;
        parent.child_ids().iter().position(|&id| id == self.id)
    }

    pub fn ancestors(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Number of ancestors between this node and the root.
    pub fn depth(self) -> usize {
        self.ancestors().count()
    }

    pub fn first_token(self) -> Option<Self> {
        if self.is_token() {
            return Some(self);
        }
        self.children().find_map(Self::first_token)
    }

    pub fn last_token(self) -> Option<Self> {
        if self.is_token() {
            return Some(self);
        }
        self.children().rev().find_map(Self::last_token)
    }

    /// Returns `true` for nodes that cover no text, such as an empty list.
    pub fn is_empty(self) -> bool {
        self.range().is_empty()
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::SyntaxKind::*;
    use crate::{Builder, NodeId, SyntaxTree, TextRange, TextSize};

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    /// `{ a(); }` built by hand.
    fn block() -> SyntaxTree {
        let mut builder = Builder::new("{ a(); }");
        builder.start_node(SOURCE_FILE);
        builder.start_list();
        builder.start_node(BLOCK);
        builder.token(LEFT_BRACE, range(0, 1));
        builder.start_list();
        builder.start_node(EXPR_STMT);
        builder.start_node(CALL_EXPR);
        builder.token(IDENTIFIER, range(2, 3));
        builder.token(LEFT_PAREN, range(3, 4));
        builder.start_list();
        builder.finish_list();
        builder.token(RIGHT_PAREN, range(4, 5));
        builder.finish_node();
        builder.token(SEMICOLON, range(5, 6));
        builder.finish_node();
        builder.finish_list();
        builder.token(RIGHT_BRACE, range(7, 8));
        builder.finish_node();
        builder.finish_list();
        builder.token(EOF, range(8, 8));
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn dump() {
        expect![[r#"
            SOURCE_FILE@0..8
              SYNTAX_LIST@0..8
                BLOCK@0..8
                  LEFT_BRACE@0..1 "{"
                  SYNTAX_LIST@2..6
                    EXPR_STMT@2..6
                      CALL_EXPR@2..5
                        IDENTIFIER@2..3 "a"
                        LEFT_PAREN@3..4 "("
                        SYNTAX_LIST@4..4
                        RIGHT_PAREN@4..5 ")"
                      SEMICOLON@5..6 ";"
                  RIGHT_BRACE@7..8 "}"
              EOF@8..8 ""
        "#]]
        .assert_eq(&block().debug_dump());
    }

    #[test]
    fn navigation() {
        let tree = block();
        let root = tree.root();
        assert_eq!(root.id(), NodeId::ROOT);

        let block = root.child(0).and_then(|list| list.child(0)).unwrap();
        assert_eq!(block.kind(), BLOCK);
        assert_eq!(block.depth(), 2);

        let list = block.child_syntax_list().unwrap();
        assert_eq!(list.full_start(), TextSize::new(1));
        assert_eq!(list.start(), TextSize::new(2));

        let stmt = list.child(0).unwrap();
        assert_eq!(stmt.text(), "a();");
        assert_eq!(stmt.index_in_parent(), Some(0));
        assert_eq!(stmt.parent(), Some(list));
        assert_eq!(stmt.first_token().map(|token| token.text()), Some("a"));
        assert_eq!(stmt.last_token().map(|token| token.kind()), Some(SEMICOLON));

        let args = stmt.child(0).and_then(|call| call.child(2)).unwrap();
        assert!(args.is_empty());
        assert_eq!(args.full_start(), TextSize::new(4));
    }
}
