use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxKind::SOURCE_FILE;
use reknit_syntax::SyntaxNode;

use super::NodeHandler;
use crate::Reconciler;

/// Runs `inner` over a whole file. If it fails, every wrapper below the file
/// is forgotten instead and only the file itself is rebound.
pub struct TryOrForget {
    inner: Box<dyn NodeHandler>,
}

impl TryOrForget {
    pub fn new(inner: Box<dyn NodeHandler>) -> Self {
        Self { inner }
    }
}

impl NodeHandler for TryOrForget {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != SOURCE_FILE {
            return Err(InvalidReconciliation::NotASourceFile { kind: old.kind() });
        }

        let checkpoint = cx.checkpoint();
        if let Err(error) = self.inner.handle_node(cx, old, new) {
            tracing::warn!(%error, "could not reconcile the tree, forgetting its nodes instead");
            cx.rollback_to(checkpoint);
            cx.forget_descendants(old);
            cx.rebind(old, new)?;
        }
        Ok(())
    }
}
