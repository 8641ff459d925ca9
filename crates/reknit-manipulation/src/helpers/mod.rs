//! Ready made edits. Each helper computes the new text and the matching
//! [`EditKind`](crate::EditKind) from the current tree, then applies both
//! through [`Manipulate::apply_edit`](crate::Manipulate::apply_edit).

use reknit_project::{Node, NodeError, Project};
use reknit_syntax::{NodeId, SyntaxNode};

mod comma_list;
mod rename;
mod replace;
mod statements;
mod structure;

pub use comma_list::{insert_into_comma_separated, remove_comma_separated_child};
pub use rename::rename_identifier;
pub use replace::{
    format_noop, replace_node_with_text, replace_source_file_text, replace_text, set_shorthand_initializer,
};
pub use statements::{insert_statements, remove_children, remove_statements};
pub use structure::{change_child_order, unwrap_node};

fn delta(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

/// Wrappers for the children of `list` in `range`, after an edit put them
/// there.
fn wrap_children(
    project: &mut Project,
    list: Node,
    filter: impl Fn(SyntaxNode<'_>) -> bool,
    range: std::ops::Range<usize>,
) -> Result<Vec<Node>, NodeError> {
    let file = project.source_file_of(list);
    let ids = project
        .syntax(list)?
        .children()
        .filter(|&child| filter(child))
        .skip(range.start)
        .take(range.len())
        .map(SyntaxNode::id)
        .collect::<Vec<NodeId>>();
    ids.into_iter().map(|id| project.get_or_create(file, id)).collect()
}
