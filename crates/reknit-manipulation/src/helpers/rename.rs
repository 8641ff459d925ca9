use reknit_project::{Node, Project};
use reknit_syntax::SyntaxKind::{
    AS_KW, DOT, EXPORT_SPECIFIER, IDENTIFIER, IMPORT_SPECIFIER, MEMBER_EXPR, PROPERTY_ASSIGNMENT, SHORTHAND_PROPERTY,
};
use reknit_syntax::{SyntaxNode, WalkControl};

use crate::text::{RenameLocation, RenameLocations};
use crate::{Edit, EditKind, Manipulate as _, ManipulationError};

/// Renames every identifier of the file that reads the same as
/// `identifier`, which may also be a named node.
///
/// Names that only exist outside the file keep their text: property keys,
/// member names, and the external side of aliased specifiers. Shorthand
/// properties and bare specifiers gain their long form so the external name
/// survives. Returns how many places changed.
pub fn rename_identifier(project: &mut Project, identifier: Node, new_name: &str) -> Result<usize, ManipulationError> {
    let identifier =
        if project.kind(identifier) == IDENTIFIER { identifier } else { project.name_node(identifier)? };
    let file = project.source_file_of(identifier);

    let locations = {
        let syntax = project.syntax(identifier)?;
        let old_name = syntax.text();
        if old_name == new_name {
            return Ok(0);
        }

        let mut locations = Vec::new();
        syntax.tree().root().walk(&mut |node| {
            if node.kind() == IDENTIFIER && node.text() == old_name {
                locations.extend(location(node, old_name));
            }
            WalkControl::Continue
        });
        locations
    };

    let count = locations.len();
    tracing::debug!(count, new_name, "renaming identifier");
    project.apply_edit(file, Edit::new(RenameLocations::new(locations, new_name), EditKind::Rename))?;
    Ok(count)
}

fn location(identifier: SyntaxNode<'_>, old_name: &str) -> Option<RenameLocation> {
    let plain = RenameLocation::new(identifier.range());
    let Some(parent) = identifier.parent() else {
        return Some(plain);
    };
    let index = identifier.index_in_parent()?;
    let aliased = parent.child_of_kind(AS_KW).is_some();

    match parent.kind() {
        MEMBER_EXPR if index > 0 && parent.child(index - 1).is_some_and(|previous| previous.kind() == DOT) => None,
        PROPERTY_ASSIGNMENT if index == 0 => None,
        SHORTHAND_PROPERTY => Some(plain.with_prefix(format!("{old_name}: "))),
        IMPORT_SPECIFIER if aliased => (index > 0).then_some(plain),
        IMPORT_SPECIFIER => Some(plain.with_prefix(format!("{old_name} as "))),
        EXPORT_SPECIFIER if aliased => (index == 0).then_some(plain),
        EXPORT_SPECIFIER => Some(plain.with_suffix(format!(" as {old_name}"))),
        _ => Some(plain),
    }
}
