use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxNode;

use super::{NodeHandler, straight_replace};
use crate::Reconciler;

/// Requires both trees to have the same shape below the pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightReplacement;

impl NodeHandler for StraightReplacement {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        straight_replace(self, cx, old, new)
    }
}
