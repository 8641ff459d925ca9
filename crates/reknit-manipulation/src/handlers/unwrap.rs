use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxNode;

use super::{NodeHandler, StraightReplacement, ensure_new_done, kind_mismatch, next_new, next_pair};
use crate::{DualCursor, Reconciler};

/// The child at `index` was replaced by the statements of its body.
///
/// The body's statements are paired with the promoted new children. Every
/// wrapper of the unwrapped node goes away, including its statement list,
/// but the statements themselves survive.
#[derive(Debug, Clone, Copy)]
pub struct Unwrap {
    index: usize,
}

impl Unwrap {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

fn forget_except(cx: &mut Reconciler<'_>, node: SyntaxNode<'_>, inner: SyntaxNode<'_>) {
    if node == inner {
        cx.forget_only(node);
        return;
    }
    for child in node.children() {
        if cx.is_on_spine(child) {
            forget_except(cx, child, inner);
        }
    }
    cx.forget_only(node);
}

impl NodeHandler for Unwrap {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            return Err(kind_mismatch(old, new));
        }

        let mut straight = StraightReplacement;
        let mut old_children = DualCursor::new(old.children());
        let mut new_children = DualCursor::new(new.children());

        for _ in 0..self.index {
            let Some((old_child, new_child)) = next_pair(&mut old_children, &mut new_children) else {
                break;
            };
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }

        let unwrapped = old_children
            .next()
            .ok_or(InvalidReconciliation::Unreconciled { kind: old.kind(), range: old.range() })?;
        let inner = unwrapped
            .statement_list()
            .ok_or(InvalidReconciliation::MissingSyntaxList { kind: unwrapped.kind() })?;

        tracing::trace!(kind = ?unwrapped.kind(), statements = inner.child_ids().len(), "unwrap");
        for statement in inner.children() {
            let new_child = next_new(old, &mut new_children)?;
            cx.handle_for_values(&mut straight, statement, new_child)?;
        }
        forget_except(cx, unwrapped, inner);

        while let Some(old_child) = old_children.next() {
            let new_child = next_new(old, &mut new_children)?;
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }
        ensure_new_done(old, new_children)?;

        cx.rebind(old, new)
    }
}
