use std::ops::Range;

use reknit_project::{Node, NodeError, Project};
use reknit_syntax::SyntaxKind::{LEFT_BRACE, RIGHT_BRACE, SOURCE_FILE};
use reknit_syntax::{SyntaxNode, TextRange, TextSize};

use super::{delta, wrap_children};
use crate::text::{Insertion, RemoveChildren, RemoveOptions, TextEditError, indentation_at, lead_start, trail_end};
use crate::{Edit, EditKind, Manipulate as _, ManipulationError};

/// Inserts the statements in `text` at `index` of the statement list of
/// `owner`, indented one level deeper than `owner`'s line.
///
/// Returns wrappers for the inserted statements.
pub fn insert_statements(
    project: &mut Project,
    owner: Node,
    index: usize,
    text: &str,
) -> Result<Vec<Node>, ManipulationError> {
    let list = project.statement_list(owner)?;
    let file = project.source_file_of(owner);
    let count = statement_count(project, text)?;
    let settings = project.settings().clone();

    let insertion = {
        let syntax = project.syntax(list)?;
        let len = syntax.child_ids().len();
        if index > len {
            return Err(NodeError::IndexOutOfBounds { index, len }.into());
        }

        let full_text = syntax.tree().text();
        let container = syntax.parent().unwrap_or(syntax);
        let outer = if container.kind() == SOURCE_FILE {
            ""
        } else {
            indentation_at(full_text, container.start().into())
        };
        let indent = if container.kind() == SOURCE_FILE { String::new() } else { format!("{outer}{}", settings.indent) };
        let newline = settings.newline.as_str();
        let body = text.trim().lines().collect::<Vec<_>>().join(&format!("{newline}{indent}"));

        match (syntax.child(index), index.checked_sub(1).and_then(|last| syntax.child(last))) {
            (Some(next), _) => Insertion::new(lead_start(next), format!("{body}{newline}{indent}")),
            (None, Some(last)) => Insertion::new(trail_end(last), format!("{newline}{indent}{body}")),
            (None, None) => into_empty(container, &body, &indent, outer, newline),
        }
    };

    let kind = EditKind::child_index(list, index, delta(count));
    project.apply_edit(file, Edit::new(insertion, kind))?;
    Ok(wrap_children(project, list, |_| true, index..index + count)?)
}

fn statement_count(project: &Project, text: &str) -> Result<usize, ManipulationError> {
    let parse = project.parser().parse(text)?;
    Ok(parse.tree().root().statement_list().map_or(0, |list| list.child_ids().len()))
}

/// Text for the first statements of an empty block or file.
fn into_empty(container: SyntaxNode<'_>, body: &str, indent: &str, outer: &str, newline: &str) -> Insertion {
    let full_text = container.tree().text();
    let braces = container.child_of_kind(LEFT_BRACE).zip(container.child_of_kind(RIGHT_BRACE));
    let Some((open, close)) = braces else {
        let end = TextSize::of(full_text);
        let separator = if full_text.is_empty() || full_text.ends_with('\n') { "" } else { newline };
        return Insertion::new(end, format!("{separator}{body}{newline}"));
    };

    let inside = TextRange::new(open.end(), close.start());
    if full_text[inside].trim().is_empty() {
        Insertion::new(open.end(), format!("{newline}{indent}{body}{newline}{outer}")).replacing(inside.len())
    } else {
        Insertion::new(open.end(), format!("{newline}{indent}{body}"))
    }
}

/// Removes the statements at `range` of the statement list of `owner`,
/// together with their leading trivia and any comment trailing the last one.
pub fn remove_statements(project: &mut Project, owner: Node, range: Range<usize>) -> Result<(), ManipulationError> {
    let list = project.statement_list(owner)?;
    let file = project.source_file_of(owner);
    if range.is_empty() {
        return Err(TextEditError::NothingToRemove.into());
    }

    let remove = {
        let syntax = project.syntax(list)?;
        let len = syntax.child_ids().len();
        let (Some(first), Some(last)) = (syntax.child(range.start), syntax.child(range.end - 1)) else {
            return Err(NodeError::IndexOutOfBounds { index: range.end, len }.into());
        };
        let removed = TextRange::new(first.full_start(), trail_end(last));
        let options = RemoveOptions { following_newlines: removed.start() == 0.into(), ..RemoveOptions::default() };
        RemoveChildren::new(removed).with_options(options)
    };

    let kind = EditKind::child_index(list, range.start, -delta(range.len()));
    project.apply_edit(file, Edit::new(remove, kind))?;
    Ok(())
}

/// Removes consecutive siblings, trimming whitespace around them as
/// `options` asks.
pub fn remove_children(project: &mut Project, nodes: &[Node], options: RemoveOptions) -> Result<(), ManipulationError> {
    let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
        return Err(TextEditError::NothingToRemove.into());
    };
    let parent = project.parent(first)?.ok_or(NodeError::NotInList { kind: project.kind(first) })?;
    let index = project.child_index(first)?;

    for (offset, &node) in nodes.iter().enumerate() {
        let syntax = project.syntax(node)?;
        let parent_id = project.syntax(parent)?.id();
        if syntax.parent().map(SyntaxNode::id) != Some(parent_id) || syntax.index_in_parent() != Some(index + offset) {
            return Err(TextEditError::NotConsecutive.into());
        }
    }

    let range = TextRange::new(project.range(first)?.start(), project.range(last)?.end());
    let file = project.source_file_of(first);
    let kind = EditKind::child_index(parent, index, -delta(nodes.len()));
    project.apply_edit(file, Edit::new(RemoveChildren::new(range).with_options(options), kind))?;
    Ok(())
}
