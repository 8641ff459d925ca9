//! Strategies that pair an old tree with its re-parsed counterpart.
//!
//! Every handler gets an old node and the new node it is believed to
//! correspond to, decides what happens to the wrappers at and below the old
//! node, and reports [`InvalidReconciliation`] when the trees disagree.

use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxNode;

use crate::{DualCursor, Reconciler};

mod child_order;
mod default_parent;
mod forget_changed;
mod parent_finder;
mod range;
mod rename;
mod straight;
mod try_or_forget;
mod unwrap;

pub use child_order::ChangeChildOrder;
pub use default_parent::DefaultParent;
pub use forget_changed::ForgetChanged;
pub use parent_finder::ParentFinder;
pub use range::{Range, RangeParent};
pub use rename::Rename;
pub use straight::StraightReplacement;
pub use try_or_forget::TryOrForget;
pub use unwrap::Unwrap;

pub trait NodeHandler {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation>;
}

impl<H: NodeHandler + ?Sized> NodeHandler for Box<H> {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        (**self).handle_node(cx, old, new)
    }
}

fn kind_mismatch(old: SyntaxNode<'_>, new: SyntaxNode<'_>) -> InvalidReconciliation {
    InvalidReconciliation::KindMismatch { old: old.kind(), new: new.kind(), range: old.range() }
}

/// Pairs the children of `old` and `new` one to one, handing each pair to
/// `recurse`, then rebinds `old` itself.
pub(crate) fn straight_replace<'a>(
    recurse: &mut dyn NodeHandler,
    cx: &mut Reconciler<'a>,
    old: SyntaxNode<'a>,
    new: SyntaxNode<'a>,
) -> Result<(), InvalidReconciliation> {
    if old.kind() != new.kind() {
        return Err(kind_mismatch(old, new));
    }

    if cx.has_wrapped_descendants(old) {
        let (old_len, new_len) = (old.child_ids().len(), new.child_ids().len());
        if old_len != new_len {
            return Err(InvalidReconciliation::ChildCountMismatch {
                kind: old.kind(),
                old: old_len,
                new: new_len,
            });
        }
        for (old_child, new_child) in old.children().zip(new.children()) {
            cx.handle_for_values(recurse, old_child, new_child)?;
        }
    }

    tracing::trace!(kind = ?old.kind(), from = ?old.range(), to = ?new.range(), "straight replace");
    cx.rebind(old, new)
}

/// Advances both cursors when neither is exhausted.
fn next_pair<'a, I, J>(
    old_children: &mut DualCursor<I>,
    new_children: &mut DualCursor<J>,
) -> Option<(SyntaxNode<'a>, SyntaxNode<'a>)>
where
    I: Iterator<Item = SyntaxNode<'a>>,
    J: Iterator<Item = SyntaxNode<'a>>,
{
    if old_children.done() || new_children.done() {
        return None;
    }
    Some((old_children.next()?, new_children.next()?))
}

/// Pulls the new child paired with the next old one, failing when the new
/// side ran out first.
fn next_new<'a, I>(
    parent: SyntaxNode<'_>,
    new_children: &mut DualCursor<I>,
) -> Result<SyntaxNode<'a>, InvalidReconciliation>
where
    I: Iterator<Item = SyntaxNode<'a>>,
{
    new_children.next().ok_or(InvalidReconciliation::MissingNewChild { kind: parent.kind() })
}

fn ensure_new_done<'a, I>(
    parent: SyntaxNode<'_>,
    new_children: DualCursor<I>,
) -> Result<(), InvalidReconciliation>
where
    I: Iterator<Item = SyntaxNode<'a>>,
{
    match new_children.rest().count() {
        0 => Ok(()),
        count => Err(InvalidReconciliation::LeftoverNewChildren { kind: parent.kind(), count }),
    }
}

#[cfg(test)]
mod tests;
