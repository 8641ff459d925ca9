//! Picks the node handler that matches what an edit did to the tree.

use reknit_project::{Capabilities, Node, NodeError, Project};
use reknit_syntax::SyntaxKind::{COMMA, SYNTAX_LIST};

use crate::EditKind;
use crate::handlers::{
    ChangeChildOrder, DefaultParent, ForgetChanged, NodeHandler, ParentFinder, Range, RangeParent, Rename,
    StraightReplacement, TryOrForget, Unwrap,
};

/// Builds the handler for `kind`, to be run from the root of `file`.
///
/// Handlers for a specific parent are found through a [`ParentFinder`]
/// unless the parent is the file itself. Everything is checked against the
/// current tree, so this has to happen before the text changes.
pub fn handler_for(project: &Project, file: Node, kind: EditKind) -> Result<Box<dyn NodeHandler>, NodeError> {
    match kind {
        EditKind::ChildIndex { parent, index, delta, replacing, custom_mappings } => {
            let len = project.syntax(parent)?.child_ids().len();
            let end = index + if delta < 0 { delta.unsigned_abs() } else { 0 };
            if index > len || end > len {
                return Err(NodeError::IndexOutOfBounds { index: end.max(index), len });
            }
            let handler = DefaultParent::new(index, delta)
                .with_replacing(replacing)
                .with_custom_mappings(custom_mappings);
            within(project, file, parent, handler)
        }
        EditKind::ParentRange { parent, start, end, replacing_length, replacing, custom_mappings } => {
            let handler = RangeParent::new(start, end)
                .with_replacing_length(replacing_length)
                .with_replacing(replacing)
                .with_custom_mappings(custom_mappings);
            within(project, file, parent, handler)
        }
        EditKind::Range { parent, start, end, replacing_length } => {
            within(project, file, parent, Range::new(start, end, replacing_length))
        }
        EditKind::ChildOrder { parent, old_index, new_index } => {
            let len = project.syntax(parent)?.children().filter(|child| child.kind() != COMMA).count();
            if let Some(index) = [old_index, new_index].into_iter().find(|&index| index >= len) {
                return Err(NodeError::IndexOutOfBounds { index, len });
            }
            within(project, file, parent, ChangeChildOrder::new(old_index, new_index))
        }
        EditKind::Unwrap { node } => {
            if !project.is(node, Capabilities::UNWRAPPABLE) {
                return Err(NodeError::MissingCapability {
                    kind: project.kind(node),
                    capability: Capabilities::UNWRAPPABLE,
                });
            }
            let syntax = project.syntax(node)?;
            let (Some(list), Some(index)) =
                (syntax.parent().filter(|parent| parent.kind() == SYNTAX_LIST), syntax.index_in_parent())
            else {
                return Err(NodeError::NotInList { kind: syntax.kind() });
            };
            check_file(project, file, node)?;
            Ok(Box::new(ParentFinder::new(Box::new(Unwrap::new(index)), list)))
        }
        EditKind::Rename => Ok(Box::new(Rename)),
        EditKind::Straight => Ok(Box::new(StraightReplacement)),
        EditKind::BestEffort => Ok(Box::new(TryOrForget::new(Box::new(ForgetChanged)))),
    }
}

fn check_file(project: &Project, file: Node, node: Node) -> Result<(), NodeError> {
    if project.source_file_of(node) == file {
        Ok(())
    } else {
        Err(NodeError::OtherFile { kind: project.kind(node) })
    }
}

fn within(
    project: &Project,
    file: Node,
    parent: Node,
    handler: impl NodeHandler + 'static,
) -> Result<Box<dyn NodeHandler>, NodeError> {
    check_file(project, file, parent)?;
    if parent == file {
        return Ok(Box::new(handler));
    }
    let syntax = project.syntax(parent)?;
    Ok(Box::new(ParentFinder::new(Box::new(handler), syntax)))
}
