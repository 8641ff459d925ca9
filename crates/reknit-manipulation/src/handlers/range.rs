use reknit_project::{InvalidReconciliation, Node};
use reknit_syntax::SyntaxKind::DOC_COMMENT;
use reknit_syntax::{SyntaxNode, TextSize};

use super::default_parent::{apply_custom_mappings, try_replace};
use super::{NodeHandler, StraightReplacement, ensure_new_done, kind_mismatch, next_new, next_pair};
use crate::{CustomMappings, DualCursor, Reconciler};

/// End of `node` for range comparisons. Doc comments are measured without
/// trailing whitespace so trivia never pushes them across a boundary.
fn real_end(node: SyntaxNode<'_>) -> TextSize {
    if node.kind() != DOC_COMMENT {
        return node.end();
    }
    node.start() + TextSize::of(node.text().trim_end())
}

/// Whether a new child lies inside inserted text ending at `end`. Empty
/// nodes sitting right at `end`, such as `EOF`, follow the insertion.
fn is_inserted(child: SyntaxNode<'_>, end: TextSize) -> bool {
    real_end(child) <= end && !(child.is_empty() && child.start() == end)
}

/// New text was spliced in among the direct children of the changing parent.
///
/// New children inside `start..end` are brand new. Old children covered by
/// the replaced text keep their wrappers only if they line up kind for kind
/// with the new ones; otherwise they are forgotten.
pub struct RangeParent {
    start: TextSize,
    end: TextSize,
    replacing_length: Option<TextSize>,
    replacing: Vec<Node>,
    custom_mappings: Option<CustomMappings>,
}

impl RangeParent {
    pub fn new(start: TextSize, end: TextSize) -> Self {
        Self { start, end, replacing_length: None, replacing: Vec::new(), custom_mappings: None }
    }

    pub fn with_replacing_length(mut self, replacing_length: Option<TextSize>) -> Self {
        self.replacing_length = replacing_length;
        self
    }

    pub fn with_replacing(mut self, replacing: Vec<Node>) -> Self {
        self.replacing = replacing;
        self
    }

    pub fn with_custom_mappings(mut self, custom_mappings: Option<CustomMappings>) -> Self {
        self.custom_mappings = custom_mappings;
        self
    }

    fn straight_replace<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if try_replace(&mut self.replacing, cx, old) {
            return Ok(());
        }
        cx.handle_for_values(&mut StraightReplacement, old, new)
    }
}

impl NodeHandler for RangeParent {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            return Err(kind_mismatch(old, new));
        }

        apply_custom_mappings(self.custom_mappings.as_ref(), cx, new)?;

        let mut old_children = DualCursor::new(old.children());
        let mut new_children = DualCursor::new(new.children());

        while new_children.peek().is_some_and(|child| child.start() < self.start) {
            let Some((old_child, new_child)) = next_pair(&mut old_children, &mut new_children) else {
                break;
            };
            self.straight_replace(cx, old_child, new_child)?;
        }

        let mut inserted = Vec::new();
        while let Some(&child) = new_children.peek()
            && is_inserted(child, self.end)
        {
            inserted.push(child);
            new_children.next();
        }

        if let Some(replacing_length) = self.replacing_length {
            let replaced_end = self.start + replacing_length;
            let mut removed = Vec::new();
            while let Some(&child) = old_children.peek()
                && (real_end(child) <= replaced_end || child.start() < replaced_end)
            {
                removed.push(child);
                old_children.next();
            }

            let reusable = removed.len() == inserted.len()
                && removed.iter().zip(&inserted).all(|(old, new)| old.kind() == new.kind());
            tracing::trace!(removed = removed.len(), inserted = inserted.len(), reusable, "range replace");
            for (index, old_child) in removed.into_iter().enumerate() {
                if try_replace(&mut self.replacing, cx, old_child) {
                    continue;
                }
                match inserted.get(index) {
                    Some(&new_child) if reusable && cx.wrapper(old_child).is_some() => {
                        cx.forget_descendants(old_child);
                        cx.rebind(old_child, new_child)?;
                    }
                    _ => cx.forget(old_child),
                }
            }
        }

        while let Some(old_child) = old_children.next() {
            let new_child = next_new(old, &mut new_children)?;
            self.straight_replace(cx, old_child, new_child)?;
        }
        ensure_new_done(old, new_children)?;

        cx.rebind(old, new)
    }
}

/// New text was spliced in somewhere below the changing parent, possibly in
/// the middle of a node.
///
/// Children that contain the edit start are descended into with the same
/// handler; old children entirely covered by the replaced text are forgotten.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    start: TextSize,
    end: TextSize,
    replaced_end: TextSize,
}

impl Range {
    pub fn new(start: TextSize, end: TextSize, replacing_length: TextSize) -> Self {
        Self { start, end, replaced_end: start + replacing_length }
    }

    /// Whether the pair contains the edit and has to be descended into.
    fn straddles(&self, old: SyntaxNode<'_>, new: SyntaxNode<'_>) -> bool {
        if old.start() < self.start {
            return true;
        }
        old.start() == self.start
            && ((new.end() > self.end && old.end() > self.replaced_end)
                || (old.is_empty() && new.start() == self.start))
    }
}

impl NodeHandler for Range {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if old.kind() != new.kind() {
            return Err(kind_mismatch(old, new));
        }

        let mut straight = StraightReplacement;
        let mut old_children = DualCursor::new(old.children());
        let mut new_children = DualCursor::new(new.children());

        while new_children.peek().is_some_and(|child| child.end() <= self.start) {
            let Some((old_child, new_child)) = next_pair(&mut old_children, &mut new_children) else {
                break;
            };
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }

        while let (Some(&old_child), Some(&new_child)) = (old_children.peek(), new_children.peek())
            && self.straddles(old_child, new_child)
        {
            old_children.next();
            new_children.next();
            cx.handle_for_values(self, old_child, new_child)?;
        }

        if self.replaced_end > self.start {
            while let Some(&old_child) = old_children.peek()
                && old_child.start() >= self.start
                && old_child.end() <= self.replaced_end
            {
                old_children.next();
                cx.forget(old_child);
            }
        }

        while new_children.peek().is_some_and(|&child| is_inserted(child, self.end)) {
            new_children.next();
        }

        while let Some(old_child) = old_children.next() {
            let new_child = next_new(old, &mut new_children)?;
            cx.handle_for_values(&mut straight, old_child, new_child)?;
        }
        ensure_new_done(old, new_children)?;

        cx.rebind(old, new)
    }
}
