//! State shared by every node handler while an old tree is paired with a new
//! one.

use reknit_project::{Checkpoint, InvalidReconciliation, Node, NodeError, Project, Transaction};
use reknit_syntax::{NodeId, SyntaxNode, SyntaxTree, WalkControl};
use rustc_hash::FxHashSet;

use crate::handlers::NodeHandler;

/// Pairs nodes of a file's current tree with nodes of its re-parsed tree and
/// records the outcome for every wrapper in a [`Transaction`].
pub struct Reconciler<'a> {
    project: &'a Project,
    file: Node,
    old: &'a SyntaxTree,
    new: &'a SyntaxTree,
    tx: Transaction,
    /// Old nodes that are wrapped or have a wrapped descendant. Nothing else
    /// needs to be visited.
    spine: FxHashSet<NodeId>,
    /// Wrappers placed by custom mappings; the generic walk leaves them alone.
    mapped: FxHashSet<Node>,
}

impl<'a> Reconciler<'a> {
    pub fn new(project: &'a Project, file: Node, new: &'a SyntaxTree) -> Result<Self, NodeError> {
        let old = project.tree(file)?;

        let mut spine = FxHashSet::default();
        for (id, _) in project.wrapped(file)? {
            let mut node = Some(old.node(id));
            while let Some(current) = node {
                if !spine.insert(current.id()) {
                    break;
                }
                node = current.parent();
            }
        }

        Ok(Self {
            project,
            file,
            old,
            new,
            tx: Transaction::new(file),
            spine,
            mapped: FxHashSet::default(),
        })
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn file(&self) -> Node {
        self.file
    }

    pub fn old_root(&self) -> SyntaxNode<'a> {
        self.old.root()
    }

    pub fn new_root(&self) -> SyntaxNode<'a> {
        self.new.root()
    }

    pub fn new_tree(&self) -> &'a SyntaxTree {
        self.new
    }

    /// The wrapper currently bound to `old`, if any.
    pub fn wrapper(&self, old: SyntaxNode<'_>) -> Option<Node> {
        self.project.existing(self.file, old.id())
    }

    /// Whether `old` or anything below it is wrapped.
    pub fn is_on_spine(&self, old: SyntaxNode<'_>) -> bool {
        self.spine.contains(&old.id())
    }

    pub fn has_wrapped_descendants(&self, old: SyntaxNode<'_>) -> bool {
        old.child_ids().iter().any(|id| self.spine.contains(id))
    }

    fn is_mapped(&self, old: SyntaxNode<'_>) -> bool {
        self.wrapper(old).is_some_and(|node| self.mapped.contains(&node))
    }

    /// Hands a pair to `handler` when the old side matters to some wrapper.
    pub fn handle_for_values(
        &mut self,
        handler: &mut dyn NodeHandler,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        if !self.is_on_spine(old) {
            return Ok(());
        }
        if self.is_mapped(old) {
            self.forget_descendants(old);
            return Ok(());
        }
        handler.handle_node(self, old, new)
    }

    /// Moves the wrapper of `old`, if there is one, onto `new`.
    pub fn rebind(&mut self, old: SyntaxNode<'_>, new: SyntaxNode<'_>) -> Result<(), InvalidReconciliation> {
        match self.wrapper(old) {
            Some(node) if !self.mapped.contains(&node) => self.tx.rebind(self.project, node, new),
            _ => Ok(()),
        }
    }

    /// Binds a specific wrapper to `new`, bypassing positional pairing.
    pub fn map(&mut self, node: Node, new: SyntaxNode<'_>) -> Result<(), InvalidReconciliation> {
        self.tx.rebind(self.project, node, new)?;
        self.mapped.insert(node);
        Ok(())
    }

    /// Forgets the wrapper of `old` and every wrapper below it.
    pub fn forget(&mut self, old: SyntaxNode<'_>) {
        self.forget_descendants(old);
        self.forget_only(old);
    }

    pub fn forget_descendants(&mut self, old: SyntaxNode<'_>) {
        let mut wrapped = Vec::new();
        old.walk(&mut |descendant| {
            if !self.spine.contains(&descendant.id()) {
                return WalkControl::SkipChildren;
            }
            wrapped.extend(self.wrapper(descendant));
            WalkControl::Continue
        });
        for node in wrapped {
            self.tx.forget(node);
        }
    }

    /// Forgets the wrapper of `old` without touching its descendants.
    pub fn forget_only(&mut self, old: SyntaxNode<'_>) {
        if let Some(node) = self.wrapper(old) {
            self.tx.forget(node);
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.tx.checkpoint()
    }

    pub fn rollback_to(&mut self, checkpoint: Checkpoint) {
        self.tx.rollback_to(checkpoint);
        let tx = &self.tx;
        self.mapped.retain(|&node| tx.decision(node).is_some());
    }

    pub fn finish(self) -> Transaction {
        self.tx
    }
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("file", &self.file)
            .field("spine", &self.spine.len())
            .finish_non_exhaustive()
    }
}
