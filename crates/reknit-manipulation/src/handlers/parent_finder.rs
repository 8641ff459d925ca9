use reknit_project::InvalidReconciliation;
use reknit_syntax::{SyntaxKind, SyntaxNode, TextSize};

use super::{NodeHandler, straight_replace};
use crate::Reconciler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    kind: SyntaxKind,
    full_start: TextSize,
}

impl Position {
    fn of(node: SyntaxNode<'_>) -> Self {
        Self { kind: node.kind(), full_start: node.full_start() }
    }
}

/// Straight replacement from the root down to the changing parent, which is
/// then handed to `inner`.
///
/// The parent is recognised in the new tree by kind and full start, checked
/// for the node and its parent. When both share a full start the ancestor
/// count has to match as well.
pub struct ParentFinder {
    inner: Box<dyn NodeHandler>,
    parent: Position,
    grandparent: Option<Position>,
    depth: usize,
    parents_at_same_pos: bool,
    found: bool,
}

impl ParentFinder {
    /// `changing_parent` is taken from the tree before the edit.
    pub fn new(inner: Box<dyn NodeHandler>, changing_parent: SyntaxNode<'_>) -> Self {
        let parent = Position::of(changing_parent);
        let grandparent = changing_parent.parent().map(Position::of);
        Self {
            inner,
            parent,
            grandparent,
            depth: changing_parent.depth(),
            parents_at_same_pos: grandparent.is_some_and(|grandparent| grandparent.full_start == parent.full_start),
            found: false,
        }
    }

    fn is_parent(&self, new: SyntaxNode<'_>) -> bool {
        if Position::of(new) != self.parent || new.parent().map(Position::of) != self.grandparent {
            return false;
        }
        !self.parents_at_same_pos || new.depth() == self.depth
    }
}

impl NodeHandler for ParentFinder {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if !self.found && self.is_parent(new) {
            self.found = true;
            tracing::trace!(kind = ?new.kind(), range = ?new.range(), "found changing parent");
            return self.inner.handle_node(cx, old, new);
        }
        straight_replace(self, cx, old, new)
    }
}
