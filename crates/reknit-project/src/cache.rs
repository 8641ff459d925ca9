//! The wrapper cache: creation, lookup, rebinding, forgetting and scopes.

use reknit_syntax::{NodeId, SyntaxKind, WalkControl};

use crate::events::FileEvent;
use crate::kinds::{self, Capabilities, NodeClass};
use crate::node::{Binding, Derived, NodeSlot};
use crate::{FxIndexSet, InvalidReconciliation, Node, NodeError, Project};

/// Nodes a [`Project::with_scope`] callback wants to outlive the scope.
#[derive(Debug, Default)]
pub struct Kept(Vec<Node>);

impl Kept {
    pub fn keep(&mut self, node: Node) {
        self.0.push(node);
    }
}

impl Project {
    /// Kind of the node a wrapper was created for. Never changes, even after
    /// the wrapper is forgotten.
    pub fn kind(&self, node: Node) -> SyntaxKind {
        self.slots[node.0].kind
    }

    pub fn class(&self, node: Node) -> NodeClass {
        self.slots[node.0].class
    }

    pub fn capabilities(&self, node: Node) -> Capabilities {
        self.slots[node.0].capabilities
    }

    pub fn is(&self, node: Node, capability: Capabilities) -> bool {
        self.capabilities(node).contains(capability)
    }

    pub(crate) fn require(&self, node: Node, capability: Capabilities) -> Result<(), NodeError> {
        if self.is(node, capability) {
            Ok(())
        } else {
            Err(NodeError::MissingCapability { kind: self.kind(node), capability })
        }
    }

    pub fn was_forgotten(&self, node: Node) -> bool {
        self.slots[node.0].binding == Binding::Forgotten
    }

    /// Returns the wrapper for `id` in `file`, creating it if needed. New
    /// wrappers join the innermost active scope.
    pub fn get_or_create(&mut self, file: Node, id: NodeId) -> Result<Node, NodeError> {
        let data = self.file_data(file)?;
        if let Some(&node) = data.wrappers.get(&id) {
            return Ok(node);
        }

        let kind = data.tree.node(id).kind();
        let descriptor = kinds::descriptor(kind);
        let node = Node(self.slots.alloc(NodeSlot {
            kind,
            class: descriptor.class,
            capabilities: descriptor.capabilities,
            source_file: Some(file),
            binding: Binding::Bound(id),
            derived: Derived::default(),
        }));

        if let Some(data) = self.files.get_mut(&file) {
            data.wrappers.insert(id, node);
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(node);
        }
        Ok(node)
    }

    /// The wrapper for `id` if one exists, without creating it.
    pub fn existing(&self, file: Node, id: NodeId) -> Option<Node> {
        self.files.get(&file)?.wrappers.get(&id).copied()
    }

    pub fn has(&self, file: Node, id: NodeId) -> bool {
        self.existing(file, id).is_some()
    }

    /// Moves a wrapper to another node of its file's current tree, keeping
    /// its identity and dropping its derived data.
    pub fn rebind(&mut self, node: Node, id: NodeId) -> Result<(), InvalidReconciliation> {
        let kind = self.kind(node);
        let Ok(current) = self.bound_id(node) else {
            return Err(InvalidReconciliation::RebindForgotten { kind });
        };
        let file = self.source_file_of(node);
        let data = self.files.get_mut(&file).ok_or(InvalidReconciliation::RebindForgotten { kind })?;

        let target = data.tree.node(id);
        if target.kind() != kind {
            return Err(InvalidReconciliation::KindMismatch {
                old: kind,
                new: target.kind(),
                range: target.range(),
            });
        }
        if data.wrappers.get(&id).is_some_and(|&other| other != node) {
            return Err(InvalidReconciliation::NodeClaimedTwice { kind });
        }

        data.wrappers.remove(&current);
        data.wrappers.insert(id, node);
        self.slots[node.0].bind(id);
        Ok(())
    }

    /// Forgets a wrapper along with every wrapper below it. Forgetting a
    /// source file removes the file from the project.
    pub fn forget(&mut self, node: Node) {
        let Ok(id) = self.bound_id(node) else {
            return;
        };

        let file = self.source_file_of(node);
        if file == node {
            self.forget_file(file);
            return;
        }

        let Some(data) = self.files.get_mut(&file) else {
            return;
        };

        let mut forgotten = Vec::new();
        data.tree.node(id).walk(&mut |descendant| {
            if let Some(wrapper) = data.wrappers.remove(&descendant.id()) {
                forgotten.push(wrapper);
            }
            WalkControl::Continue
        });
        data.wrappers.remove(&id);
        forgotten.push(node);

        for wrapper in forgotten {
            self.slots[wrapper.0].forget();
        }
    }

    /// Forgets `node` alone. Wrappers below it stay bound.
    fn forget_only(&mut self, node: Node) {
        let Ok(id) = self.bound_id(node) else {
            return;
        };
        let file = self.source_file_of(node);
        if let Some(data) = self.files.get_mut(&file) {
            data.wrappers.remove(&id);
        }
        self.slots[node.0].forget();
    }

    fn forget_file(&mut self, file: Node) {
        let Some(data) = self.files.remove(&file) else {
            return;
        };
        for &wrapper in data.wrappers.values() {
            self.slots[wrapper.0].forget();
        }
        self.slots[file.0].forget();
        self.paths.remove(&data.path);

        tracing::debug!(path = %data.path, wrappers = data.wrappers.len(), "removed source file");
        self.emit(&FileEvent::Removed { file, path: data.path });
    }

    /// Opens a scope. Wrappers created until the matching
    /// [`end_scope`](Self::end_scope) are forgotten then unless kept.
    pub fn begin_scope(&mut self) {
        self.scopes.push(FxIndexSet::default());
    }

    pub fn end_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            tracing::warn!("end_scope called without a matching begin_scope");
            return;
        };

        for node in scope {
            if self.was_forgotten(node) || self.class(node) == NodeClass::SourceFile {
                continue;
            }
            self.forget_only(node);
        }
    }

    /// Removes `node` and its wrapped ancestors from every active scope.
    pub fn keep(&mut self, node: Node) -> Result<(), NodeError> {
        if self.was_forgotten(node) {
            return Err(NodeError::KeepForgotten);
        }
        if self.scopes.is_empty() {
            return Ok(());
        }

        let file = self.source_file_of(node);
        let mut kept = vec![node];
        let syntax = self.syntax(node)?;
        kept.extend(syntax.ancestors().filter_map(|ancestor| self.existing(file, ancestor.id())));

        for scope in &mut self.scopes {
            for node in &kept {
                scope.shift_remove(node);
            }
        }
        Ok(())
    }

    /// Runs `f` inside a fresh scope. Every wrapper created by `f` is
    /// forgotten afterwards unless it was handed to [`Kept::keep`].
    pub fn with_scope<R>(&mut self, f: impl FnOnce(&mut Self, &mut Kept) -> R) -> Result<R, NodeError> {
        self.begin_scope();
        let mut kept = Kept::default();
        let result = f(self, &mut kept);
        let outcome = kept.0.into_iter().try_for_each(|node| self.keep(node));
        self.end_scope();
        outcome.map(|()| result)
    }
}
