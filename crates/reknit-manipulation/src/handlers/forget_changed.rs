use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxNode;

use super::NodeHandler;
use crate::Reconciler;

/// Positional pairing that never fails: a node whose kind changed is
/// forgotten with everything below it, and old children without a new
/// counterpart are forgotten as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForgetChanged;

impl NodeHandler for ForgetChanged {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            tracing::trace!(old = ?old.kind(), new = ?new.kind(), "kind changed, forgetting");
            cx.forget(old);
            return Ok(());
        }

        if cx.has_wrapped_descendants(old) {
            let mut new_children = new.children();
            for old_child in old.children() {
                match new_children.next() {
                    Some(new_child) => cx.handle_for_values(self, old_child, new_child)?,
                    None => cx.forget(old_child),
                }
            }
        }

        cx.rebind(old, new)
    }
}
