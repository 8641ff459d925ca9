use reknit_project::{InvalidReconciliation, Node};
use reknit_syntax::SyntaxNode;

use super::{NodeHandler, StraightReplacement, ensure_new_done, kind_mismatch, next_new, next_pair};
use crate::{CustomMappings, DualCursor, Reconciler};

/// Children were inserted or removed at one index of the changing parent.
pub struct DefaultParent {
    index: usize,
    delta: isize,
    replacing: Vec<Node>,
    custom_mappings: Option<CustomMappings>,
}

impl DefaultParent {
    pub fn new(index: usize, delta: isize) -> Self {
        Self { index, delta, replacing: Vec::new(), custom_mappings: None }
    }

    pub fn with_replacing(mut self, replacing: Vec<Node>) -> Self {
        self.replacing = replacing;
        self
    }

    pub fn with_custom_mappings(mut self, custom_mappings: Option<CustomMappings>) -> Self {
        self.custom_mappings = custom_mappings;
        self
    }
}

/// Applies caller supplied pairs before the positional walk starts.
pub(super) fn apply_custom_mappings(
    custom_mappings: Option<&CustomMappings>,
    cx: &mut Reconciler<'_>,
    new: SyntaxNode<'_>,
) -> Result<(), InvalidReconciliation> {
    let Some(custom_mappings) = custom_mappings else {
        return Ok(());
    };
    let tree = cx.new_tree();
    for (node, id) in custom_mappings(new) {
        cx.map(node, tree.node(id))?;
    }
    Ok(())
}

/// Forgets `old` if its wrapper is one of the explicitly replaced nodes.
pub(super) fn try_replace(replacing: &mut Vec<Node>, cx: &mut Reconciler<'_>, old: SyntaxNode<'_>) -> bool {
    let Some(node) = cx.wrapper(old) else {
        return false;
    };
    let Some(index) = replacing.iter().position(|&replaced| replaced == node) else {
        return false;
    };
    replacing.swap_remove(index);
    cx.forget(old);
    true
}

impl NodeHandler for DefaultParent {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            return Err(kind_mismatch(old, new));
        }

        apply_custom_mappings(self.custom_mappings.as_ref(), cx, new)?;

        let mut straight = StraightReplacement;
        let mut old_children = DualCursor::new(old.children());
        let mut new_children = DualCursor::new(new.children());

        for _ in 0..self.index {
            let Some((old_child, new_child)) = next_pair(&mut old_children, &mut new_children) else {
                break;
            };
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }

        while let Some(&old_child) = old_children.peek()
            && try_replace(&mut self.replacing, cx, old_child)
        {
            old_children.next();
        }

        tracing::trace!(kind = ?old.kind(), index = self.index, delta = self.delta, "child index change");
        if self.delta > 0 {
            for _ in 0..self.delta {
                new_children.next();
            }
        } else {
            for _ in 0..self.delta.unsigned_abs() {
                if let Some(removed) = old_children.next() {
                    cx.forget(removed);
                }
            }
        }

        while let Some(old_child) = old_children.next() {
            let new_child = next_new(old, &mut new_children)?;
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }
        ensure_new_done(old, new_children)?;

        cx.rebind(old, new)
    }
}
