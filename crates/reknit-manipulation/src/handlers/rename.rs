use reknit_project::InvalidReconciliation;
use reknit_syntax::SyntaxKind::*;
use reknit_syntax::SyntaxNode;

use super::{NodeHandler, straight_replace};
use crate::Reconciler;

/// Straight replacement that tolerates the two shape changes a rename can
/// cause: a shorthand property growing a value, and a specifier growing an
/// `as` clause.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rename;

fn has_alias(specifier: SyntaxNode<'_>) -> bool {
    specifier.child_of_kind(AS_KW).is_some()
}

impl NodeHandler for Rename {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        match (old.kind(), new.kind()) {
            (SHORTHAND_PROPERTY, PROPERTY_ASSIGNMENT) => {
                // `{ a }` became `{ a: b }`; the identifier lives on as the value.
                let name = old.child_of_kind(IDENTIFIER);
                let initializer = new.children().skip_while(|child| child.kind() != COLON).nth(1);
                if let (Some(name), Some(initializer)) = (name, initializer) {
                    cx.rebind(name, initializer)?;
                }
                cx.forget(old);
                Ok(())
            }
            (IMPORT_SPECIFIER, IMPORT_SPECIFIER) | (EXPORT_SPECIFIER, EXPORT_SPECIFIER)
                if !has_alias(old) && has_alias(new) =>
            {
                let (Some(current), Some(property_name), Some(name)) =
                    (old.first_token(), new.first_token(), new.last_token())
                else {
                    return straight_replace(self, cx, old, new);
                };
                let target = if property_name.text() == current.text() { name } else { property_name };
                cx.rebind(current, target)?;
                cx.rebind(old, new)
            }
            _ => straight_replace(self, cx, old, new),
        }
    }
}
