use reknit_project::{Capabilities, Node, NodeError, Project};
use reknit_syntax::SyntaxKind::{BLOCK, SOURCE_FILE, SYNTAX_LIST};
use reknit_syntax::SyntaxNode;

use super::wrap_children;
use crate::text::{ChangeChildOrder, SiblingFormatting, Unwrap, statement_formatting};
use crate::{Edit, EditKind, Manipulate as _, ManipulationError};

fn spaced(_: SyntaxNode<'_>, _: SyntaxNode<'_>) -> SiblingFormatting {
    SiblingFormatting::Space
}

/// Moves the item at `from` to `to`. `owner` is a list, a node with
/// statements, or a node owning a comma separated list; indices skip commas.
///
/// Statements are separated by line breaks, with blank lines around bodied
/// declarations. Comma list items are separated by a space.
pub fn change_child_order(project: &mut Project, owner: Node, from: usize, to: usize) -> Result<(), ManipulationError> {
    let list = if project.kind(owner) == SYNTAX_LIST {
        owner
    } else if project.is(owner, Capabilities::STATEMENTED) {
        project.statement_list(owner)?
    } else if project.is(owner, Capabilities::COMMA_LIST) {
        project.child_syntax_list(owner)?
    } else {
        return Err(
            NodeError::MissingCapability { kind: project.kind(owner), capability: Capabilities::COMMA_LIST }.into()
        );
    };
    let file = project.source_file_of(owner);
    let newline = project.settings().newline.clone();

    let reorder = {
        let syntax = project.syntax(list)?;
        let statements = matches!(syntax.parent().map(SyntaxNode::kind), Some(SOURCE_FILE | BLOCK));
        let formatting: fn(SyntaxNode<'_>, SyntaxNode<'_>) -> SiblingFormatting =
            if statements { statement_formatting } else { spaced };
        ChangeChildOrder::new(syntax, from, to, &newline, &formatting)?
    };

    let kind = EditKind::ChildOrder { parent: list, old_index: from, new_index: to };
    project.apply_edit(file, Edit::new(reorder, kind))?;
    Ok(())
}

/// Replaces `node` with the statements of its body and returns wrappers for
/// them. `node` itself is forgotten.
pub fn unwrap_node(project: &mut Project, node: Node) -> Result<Vec<Node>, ManipulationError> {
    let kind = project.kind(node);
    if !project.is(node, Capabilities::UNWRAPPABLE) {
        return Err(NodeError::MissingCapability { kind, capability: Capabilities::UNWRAPPABLE }.into());
    }
    let list = project.parent_syntax_list(node)?.ok_or(NodeError::NotInList { kind })?;
    let index = project.child_index(node)?;
    let file = project.source_file_of(node);
    let indent_width = project.settings().indent_width();

    let (unwrap, count) = {
        let syntax = project.syntax(node)?;
        let count = syntax.statement_list().map_or(0, |inner| inner.child_ids().len());
        let unwrap =
            Unwrap::new(syntax, indent_width).ok_or(NodeError::MissingChild { kind, expected: SYNTAX_LIST })?;
        (unwrap, count)
    };

    project.apply_edit(file, Edit::new(unwrap, EditKind::Unwrap { node }))?;
    Ok(wrap_children(project, list, |_| true, index..index + count)?)
}
