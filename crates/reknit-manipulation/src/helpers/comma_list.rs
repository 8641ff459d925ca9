use reknit_project::{Capabilities, Node, NodeError, Project};
use reknit_syntax::SyntaxKind::{COMMA, SYNTAX_LIST};
use reknit_syntax::TextRange;

use super::{delta, wrap_children};
use crate::text::{CommaListInsertion, RemoveChildren, RemoveOptions};
use crate::{Edit, EditKind, Manipulate as _, ManipulationError};

/// Inserts `texts` as items of the comma separated list of `owner`, which
/// is either the list itself or a node with the [`Capabilities::COMMA_LIST`]
/// capability. `index` counts items and is clamped to the item count.
///
/// Returns wrappers for the inserted items.
pub fn insert_into_comma_separated(
    project: &mut Project,
    owner: Node,
    index: usize,
    texts: &[&str],
) -> Result<Vec<Node>, ManipulationError> {
    if project.kind(owner) != SYNTAX_LIST && !project.is(owner, Capabilities::COMMA_LIST) {
        return Err(
            NodeError::MissingCapability { kind: project.kind(owner), capability: Capabilities::COMMA_LIST }.into()
        );
    }
    let list = project.child_syntax_list(owner)?;
    let file = project.source_file_of(owner);

    let (insertion, index) = {
        let syntax = project.syntax(list)?;
        let items = syntax.children().filter(|child| child.kind() != COMMA).count();
        (CommaListInsertion::new(syntax, index, texts), index.min(items))
    };

    let kind = EditKind::child_index(list, insertion.child_index(), delta(insertion.delta()));
    project.apply_edit(file, Edit::new(insertion, kind))?;
    Ok(wrap_children(project, list, |child| child.kind() != COMMA, index..index + texts.len())?)
}

/// Removes an item of a comma separated list along with the comma that
/// belongs to it.
pub fn remove_comma_separated_child(project: &mut Project, child: Node) -> Result<(), ManipulationError> {
    let list = project.parent_syntax_list(child)?.ok_or(NodeError::NotInList { kind: project.kind(child) })?;
    let file = project.source_file_of(child);

    let (range, index, removed, options) = {
        let syntax = project.syntax(child)?;
        let siblings = project.syntax(list)?;
        let index = project.child_index(child)?;
        let next = siblings.child(index + 1).filter(|next| next.kind() == COMMA);
        let previous = index.checked_sub(1).and_then(|previous| siblings.child(previous));

        match (next, previous) {
            (Some(comma), _) => {
                let last = siblings.child(index + 2).is_none();
                let options = RemoveOptions {
                    preceding_spaces: last,
                    following_spaces: !last,
                    ..RemoveOptions::default()
                };
                (TextRange::new(syntax.start(), comma.end()), index, 2, options)
            }
            (None, Some(comma)) if comma.kind() == COMMA => {
                (TextRange::new(comma.start(), syntax.end()), index - 1, 2, RemoveOptions::default())
            }
            _ => (syntax.range(), index, 1, RemoveOptions::default()),
        }
    };

    let kind = EditKind::child_index(list, index, -delta(removed));
    project.apply_edit(file, Edit::new(RemoveChildren::new(range).with_options(options), kind))?;
    Ok(())
}
