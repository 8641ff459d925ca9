//! Queries on wrappers. All of them fail with [`NodeError::Forgotten`] once
//! the wrapper was forgotten.

use reknit_syntax::SyntaxKind::{self, *};
use reknit_syntax::{NodeId, SyntaxNode, TextRange, TextSize, WalkControl};

use crate::kinds::Capabilities;
use crate::{Node, NodeError, Project};

impl Project {
    fn wrap(&mut self, node: Node, id: NodeId) -> Result<Node, NodeError> {
        let file = self.source_file_of(node);
        self.get_or_create(file, id)
    }

    fn wrap_all(&mut self, node: Node, ids: &[NodeId]) -> Result<Vec<Node>, NodeError> {
        ids.iter().map(|&id| self.wrap(node, id)).collect()
    }

    /// Range without leading trivia.
    pub fn range(&self, node: Node) -> Result<TextRange, NodeError> {
        Ok(self.syntax(node)?.range())
    }

    pub fn full_start(&self, node: Node) -> Result<TextSize, NodeError> {
        Ok(self.syntax(node)?.full_start())
    }

    pub fn text(&self, node: Node) -> Result<&str, NodeError> {
        Ok(self.syntax(node)?.text())
    }

    pub fn parent(&mut self, node: Node) -> Result<Option<Node>, NodeError> {
        let Some(parent) = self.syntax(node)?.parent().map(SyntaxNode::id) else {
            return Ok(None);
        };
        self.wrap(node, parent).map(Some)
    }

    pub fn children(&mut self, node: Node) -> Result<Vec<Node>, NodeError> {
        let ids = self.syntax(node)?.child_ids().to_vec();
        self.wrap_all(node, &ids)
    }

    pub fn child_at(&mut self, node: Node, index: usize) -> Result<Node, NodeError> {
        let syntax = self.syntax(node)?;
        let len = syntax.child_ids().len();
        let id = syntax.child(index).ok_or(NodeError::IndexOutOfBounds { index, len })?.id();
        self.wrap(node, id)
    }

    pub fn child_of_kind(&mut self, node: Node, kind: SyntaxKind) -> Result<Node, NodeError> {
        let syntax = self.syntax(node)?;
        let child = syntax
            .child_of_kind(kind)
            .ok_or(NodeError::MissingChild { kind: syntax.kind(), expected: kind })?;
        let id = child.id();
        self.wrap(node, id)
    }

    pub fn child_index(&self, node: Node) -> Result<usize, NodeError> {
        let syntax = self.syntax(node)?;
        syntax.index_in_parent().ok_or(NodeError::NotInList { kind: syntax.kind() })
    }

    /// The `SYNTAX_LIST` holding `node`, if its parent is one.
    pub fn parent_syntax_list(&mut self, node: Node) -> Result<Option<Node>, NodeError> {
        let parent = self.syntax(node)?.parent().filter(|parent| parent.kind() == SYNTAX_LIST);
        match parent.map(SyntaxNode::id) {
            Some(id) => self.wrap(node, id).map(Some),
            None => Ok(None),
        }
    }

    /// The comma separated list a node owns, such as call arguments or the
    /// parameters of a function.
    pub fn child_syntax_list(&mut self, node: Node) -> Result<Node, NodeError> {
        if self.kind(node) == SYNTAX_LIST {
            return Ok(node);
        }
        self.child_of_kind(node, SYNTAX_LIST)
    }

    /// The statement list of a source file, block or bodied declaration.
    pub fn statement_list(&mut self, node: Node) -> Result<Node, NodeError> {
        self.require(node, Capabilities::STATEMENTED)?;
        let syntax = self.syntax(node)?;
        let list = syntax
            .statement_list()
            .ok_or(NodeError::MissingChild { kind: syntax.kind(), expected: SYNTAX_LIST })?;
        let id = list.id();
        self.wrap(node, id)
    }

    pub fn statements(&mut self, node: Node) -> Result<Vec<Node>, NodeError> {
        let list = self.statement_list(node)?;
        self.children(list)
    }

    pub fn name_node(&mut self, node: Node) -> Result<Node, NodeError> {
        self.require(node, Capabilities::NAMED)?;
        let syntax = self.syntax(node)?;
        let name = match syntax.kind() {
            IMPORT_SPECIFIER | EXPORT_SPECIFIER | MEMBER_EXPR => syntax.last_token(),
            _ => syntax.child_of_kind(IDENTIFIER),
        };
        let name = name
            .filter(|name| name.kind() == IDENTIFIER)
            .ok_or(NodeError::MissingChild { kind: syntax.kind(), expected: IDENTIFIER })?;
        let id = name.id();
        self.wrap(node, id)
    }

    pub fn initializer(&mut self, node: Node) -> Result<Option<Node>, NodeError> {
        self.require(node, Capabilities::INITIALIZED)?;
        let syntax = self.syntax(node)?;
        let separator = if syntax.kind() == PROPERTY_ASSIGNMENT { COLON } else { EQ };
        let initializer = syntax
            .children()
            .skip_while(|child| child.kind() != separator)
            .nth(1)
            .filter(|child| child.kind() != SEMICOLON)
            .map(SyntaxNode::id);
        match initializer {
            Some(id) => self.wrap(node, id).map(Some),
            None => Ok(None),
        }
    }

    /// Ranges of the string literals inside `node`, cached until the next
    /// rebind.
    pub fn string_literal_ranges(&mut self, node: Node) -> Result<&[TextRange], NodeError> {
        let syntax = self.syntax(node)?;
        if self.slots[node.0].derived.string_literals.is_none() {
            let mut ranges = Vec::new();
            syntax.walk(&mut |descendant| {
                if descendant.kind() == STRING_LITERAL {
                    ranges.push(descendant.range());
                }
                WalkControl::Continue
            });
            self.slots[node.0].derived.string_literals = Some(ranges.into());
        }
        Ok(self.slots[node.0].derived.string_literals.as_deref().unwrap_or_default())
    }

    /// Ranges of the comments inside `node` or in its leading trivia.
    pub fn comment_ranges(&mut self, node: Node) -> Result<&[TextRange], NodeError> {
        let syntax = self.syntax(node)?;
        if self.slots[node.0].derived.comments.is_none() {
            let full_range = syntax.full_range();
            let ranges = syntax
                .tree()
                .comments()
                .iter()
                .copied()
                .filter(|comment| full_range.contains_range(*comment))
                .collect::<Box<[_]>>();
            self.slots[node.0].derived.comments = Some(ranges);
        }
        Ok(self.slots[node.0].derived.comments.as_deref().unwrap_or_default())
    }

    /// Whether `pos` falls strictly inside a string literal of `file`.
    pub fn is_in_string_at_pos(&mut self, file: Node, pos: TextSize) -> Result<bool, NodeError> {
        let ranges = self.string_literal_ranges(file)?;
        Ok(ranges.iter().any(|range| range.start() < pos && pos < range.end()))
    }

    /// The deepest node below `node` whose range contains `pos`.
    ///
    /// The lookup wraps every node it inspects; only the result survives.
    pub fn descendant_at_pos(&mut self, node: Node, pos: TextSize) -> Result<Option<Node>, NodeError> {
        self.syntax(node)?;
        self.with_scope(|project, kept| {
            let mut found = None;
            let mut current = node;
            loop {
                let children = project.children(current)?;
                let index = children.partition_point(|&child| {
                    project.range(child).is_ok_and(|range| range.end() <= pos)
                });
                let Some(&child) = children.get(index) else {
                    break;
                };
                if !project.range(child)?.contains_inclusive(pos) || project.range(child)?.is_empty() {
                    break;
                }
                found = Some(child);
                current = child;
            }
            if let Some(found) = found {
                kept.keep(found);
            }
            Ok(found)
        })?
    }
}
