use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxKind::COMMA;
use reknit_syntax::SyntaxNode;

use super::{NodeHandler, StraightReplacement, kind_mismatch};
use crate::Reconciler;

/// One list item moved from `old_index` to `new_index`. Indices count items
/// only; commas keep their positions.
#[derive(Debug, Clone, Copy)]
pub struct ChangeChildOrder {
    old_index: usize,
    new_index: usize,
}

impl ChangeChildOrder {
    pub fn new(old_index: usize, new_index: usize) -> Self {
        Self { old_index, new_index }
    }

    /// The old children in the order they are expected to appear in the new
    /// tree.
    fn reordered<'a>(&self, children: &[SyntaxNode<'a>]) -> Vec<SyntaxNode<'a>> {
        let mut items = children.iter().copied().filter(|child| child.kind() != COMMA).collect::<Vec<_>>();
        if self.old_index < items.len() {
            let moved = items.remove(self.old_index);
            items.insert(self.new_index.min(items.len()), moved);
        }

        let mut items = items.into_iter();
        children
            .iter()
            .map(|&child| if child.kind() == COMMA { child } else { items.next().unwrap_or(child) })
            .collect()
    }
}

impl NodeHandler for ChangeChildOrder {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            return Err(kind_mismatch(old, new));
        }

        let children = old.children().collect::<Vec<_>>();
        let reordered = self.reordered(&children);
        if reordered.len() != new.child_ids().len() {
            return Err(InvalidReconciliation::ChildCountMismatch {
                kind: old.kind(),
                old: reordered.len(),
                new: new.child_ids().len(),
            });
        }

        tracing::trace!(from = self.old_index, to = self.new_index, "child order change");
        let mut straight = StraightReplacement;
        for (old_child, new_child) in reordered.into_iter().zip(new.children()) {
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }

        cx.rebind(old, new)
    }
}
