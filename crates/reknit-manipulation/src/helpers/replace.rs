use reknit_project::{Capabilities, Node, NodeError, Project};
use reknit_syntax::SyntaxKind::{IDENTIFIER, SHORTHAND_PROPERTY};
use reknit_syntax::{SyntaxNode, TextRange, TextSize};

use crate::text::{FullReplacement, Insertion};
use crate::{CustomMappings, Edit, EditKind, Manipulate as _, ManipulationError};

/// Replaces `range` of the file's text with `text`, which may change the
/// tree at any depth.
pub fn replace_text(project: &mut Project, file: Node, range: TextRange, text: &str) -> Result<(), ManipulationError> {
    let start = range.start();
    let kind = EditKind::Range { parent: file, start, end: start + TextSize::of(text), replacing_length: range.len() };
    project.apply_edit(file, Edit::new(Insertion::new(start, text).replacing(range.len()), kind))?;
    Ok(())
}

/// Replaces the text of `node`. The wrapper of `node` is forgotten, its
/// siblings keep theirs.
pub fn replace_node_with_text(project: &mut Project, node: Node, text: &str) -> Result<(), ManipulationError> {
    let Some(parent) = project.parent(node)? else {
        return replace_source_file_text(project, node, text);
    };
    let file = project.source_file_of(node);
    let range = project.range(node)?;
    let start = range.start();

    let kind = EditKind::ParentRange {
        parent,
        start,
        end: start + TextSize::of(text),
        replacing_length: Some(range.len()),
        replacing: vec![node],
        custom_mappings: None,
    };
    project.apply_edit(file, Edit::new(Insertion::new(start, text).replacing(range.len()), kind))?;
    Ok(())
}

/// Turns `{ name }` into `{ name: initializer }`.
///
/// The shorthand wrapper is forgotten; the wrapper of its name moves to the
/// key of the new property and is returned.
pub fn set_shorthand_initializer(
    project: &mut Project,
    shorthand: Node,
    initializer: &str,
) -> Result<Node, ManipulationError> {
    let kind = project.kind(shorthand);
    if kind != SHORTHAND_PROPERTY {
        return Err(NodeError::MissingCapability { kind, capability: Capabilities::INITIALIZED }.into());
    }
    let name = project.name_node(shorthand)?;
    let list = project.parent_syntax_list(shorthand)?.ok_or(NodeError::NotInList { kind })?;
    let index = project.child_index(shorthand)?;
    let end = project.range(shorthand)?.end();
    let file = project.source_file_of(shorthand);

    let custom_mappings: CustomMappings = Box::new(move |list: SyntaxNode<'_>| {
        list.child(index)
            .and_then(SyntaxNode::first_token)
            .filter(|key| key.kind() == IDENTIFIER)
            .map(|key| (name, key.id()))
            .into_iter()
            .collect()
    });
    let kind = EditKind::ChildIndex {
        parent: list,
        index,
        delta: 1,
        replacing: vec![shorthand],
        custom_mappings: Some(custom_mappings),
    };
    project.apply_edit(file, Edit::new(Insertion::new(end, format!(": {initializer}")), kind))?;
    Ok(name)
}

/// Replaces the whole text of `file`, keeping whatever wrappers still line
/// up with the new tree.
pub fn replace_source_file_text(project: &mut Project, file: Node, text: &str) -> Result<(), ManipulationError> {
    project.apply_edit(file, Edit::new(FullReplacement::new(text), EditKind::BestEffort))?;
    Ok(())
}

/// Re-parses `file` without changing its text. Every wrapper stays alive.
pub fn format_noop(project: &mut Project, file: Node) -> Result<(), ManipulationError> {
    let text = project.full_text(file)?.to_owned();
    project.apply_edit(file, Edit::new(FullReplacement::new(text), EditKind::Straight))?;
    Ok(())
}
