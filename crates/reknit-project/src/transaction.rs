use reknit_syntax::{NodeId, Parse, SyntaxKind, SyntaxNode};
use rustc_hash::FxHashMap;

use crate::{InvalidReconciliation, Node, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Rebind(NodeId),
    Forget,
}

/// Position in a [`Transaction`] that later decisions can be rolled back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Rebind and forget decisions for the wrappers of one file, collected while
/// an old tree is paired with a new one.
///
/// Nothing touches the project until [`Project::commit`], so a failed
/// reconciliation leaves every wrapper as it was.
#[derive(Debug)]
pub struct Transaction {
    file: Node,
    decisions: Vec<(Node, Decision)>,
    decided: FxHashMap<Node, Decision>,
    claimed: FxHashMap<NodeId, Node>,
}

impl Transaction {
    pub fn new(file: Node) -> Self {
        Self {
            file,
            decisions: Vec::new(),
            decided: FxHashMap::default(),
            claimed: FxHashMap::default(),
        }
    }

    pub fn file(&self) -> Node {
        self.file
    }

    pub fn decision(&self, node: Node) -> Option<Decision> {
        self.decided.get(&node).copied()
    }

    /// Records that `node` now stands for `new`. Repeating the same decision
    /// is allowed, contradicting an earlier one is not.
    pub fn rebind(
        &mut self,
        project: &Project,
        node: Node,
        new: SyntaxNode<'_>,
    ) -> Result<(), InvalidReconciliation> {
        let kind = project.kind(node);
        if kind != new.kind() {
            return Err(InvalidReconciliation::KindMismatch {
                old: kind,
                new: new.kind(),
                range: new.range(),
            });
        }

        match self.decided.get(&node) {
            Some(Decision::Rebind(id)) if *id == new.id() => return Ok(()),
            Some(_) => return Err(InvalidReconciliation::ConflictingDecision { kind }),
            None => {}
        }
        if self.claimed.get(&new.id()).is_some_and(|&other| other != node) {
            return Err(InvalidReconciliation::NodeClaimedTwice { kind });
        }

        self.record(node, Decision::Rebind(new.id()));
        Ok(())
    }

    /// Records that `node` no longer exists. A wrapper that already has a
    /// decision keeps it.
    pub fn forget(&mut self, node: Node) {
        if !self.decided.contains_key(&node) {
            self.record(node, Decision::Forget);
        }
    }

    fn record(&mut self, node: Node, decision: Decision) {
        self.decisions.push((node, decision));
        self.decided.insert(node, decision);
        if let Decision::Rebind(id) = decision {
            self.claimed.insert(id, node);
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.decisions.len())
    }

    pub fn rollback_to(&mut self, checkpoint: Checkpoint) {
        for (node, decision) in self.decisions.drain(checkpoint.0..) {
            self.decided.remove(&node);
            if let Decision::Rebind(id) = decision {
                self.claimed.remove(&id);
            }
        }
    }

    /// Checks that every live wrapper of the file received a decision and
    /// that the source file itself is rebound to the new root.
    pub fn verify(&self, project: &Project) -> Result<(), InvalidReconciliation> {
        let root_kind = project.kind(self.file);
        let Ok(tree) = project.tree(self.file) else {
            return Err(InvalidReconciliation::NotASourceFile { kind: root_kind });
        };

        if self.decision(self.file) != Some(Decision::Rebind(NodeId::ROOT)) {
            return Err(InvalidReconciliation::Unreconciled {
                kind: SyntaxKind::SOURCE_FILE,
                range: tree.root().range(),
            });
        }

        for &node in self.decided.keys() {
            if project.source_file_of(node) != self.file {
                return Err(InvalidReconciliation::ConflictingDecision { kind: project.kind(node) });
            }
            if project.was_forgotten(node) {
                return Err(InvalidReconciliation::RebindForgotten { kind: project.kind(node) });
            }
        }

        if let Ok(mut wrapped) = project.wrapped(self.file)
            && let Some((id, node)) = wrapped.find(|(_, node)| !self.decided.contains_key(node))
        {
            return Err(InvalidReconciliation::Unreconciled {
                kind: project.kind(node),
                range: tree.node(id).range(),
            });
        }

        Ok(())
    }
}

impl Project {
    /// Applies a verified transaction and swaps in the tree it was built
    /// against.
    pub fn commit(&mut self, parse: Parse, tx: Transaction) -> Result<(), InvalidReconciliation> {
        tx.verify(self)?;

        let file = tx.file;
        let data = self
            .files
            .get_mut(&file)
            .ok_or(InvalidReconciliation::NotASourceFile { kind: self.slots[file.0].kind })?;

        let (mut rebound, mut forgotten) = (0usize, 0usize);
        let mut wrappers = FxHashMap::default();
        for (node, decision) in tx.decisions {
            match decision {
                Decision::Rebind(id) => {
                    self.slots[node.0].bind(id);
                    wrappers.insert(id, node);
                    rebound += 1;
                }
                Decision::Forget => {
                    self.slots[node.0].forget();
                    forgotten += 1;
                }
            }
        }

        let (tree, diagnostics) = parse.into_parts();
        data.tree = tree;
        data.diagnostics = diagnostics;
        data.wrappers = wrappers;

        tracing::debug!(path = %data.path, rebound, forgotten, "committed reconciliation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reknit_parse::ScriptParser;
    use reknit_syntax::SourceParser as _;

    use super::*;

    #[test]
    fn decisions_are_validated_and_rolled_back() {
        let mut project = Project::new(ScriptParser);
        let file = project.add_source_file("main.rk", "a; b;").unwrap();
        let list = project.statement_list(file).unwrap();
        let statements = project.statements(file).unwrap();

        let parse = ScriptParser.parse("a; b;").unwrap();
        let new = parse.tree();
        let new_list = new.root().child(0).unwrap();

        let mut tx = Transaction::new(file);
        tx.rebind(&project, file, new.root()).unwrap();
        tx.rebind(&project, list, new_list).unwrap();
        assert!(matches!(
            tx.rebind(&project, statements[0], new_list),
            Err(InvalidReconciliation::KindMismatch { .. })
        ));

        let checkpoint = tx.checkpoint();
        tx.rebind(&project, statements[0], new_list.child(1).unwrap()).unwrap();
        assert!(matches!(
            tx.rebind(&project, statements[1], new_list.child(1).unwrap()),
            Err(InvalidReconciliation::NodeClaimedTwice { .. })
        ));
        tx.rollback_to(checkpoint);
        assert_eq!(tx.decision(statements[0]), None);

        tx.rebind(&project, statements[0], new_list.child(0).unwrap()).unwrap();
        assert!(matches!(tx.verify(&project), Err(InvalidReconciliation::Unreconciled { .. })));

        tx.forget(statements[1]);
        tx.forget(statements[0]);
        assert_eq!(tx.decision(statements[0]), Some(Decision::Rebind(new_list.child(0).unwrap().id())));
        tx.verify(&project).unwrap();
    }

    #[test]
    fn commit_swaps_tree_and_applies_decisions() {
        let mut project = Project::new(ScriptParser);
        let file = project.add_source_file("main.rk", "a; b;").unwrap();
        let statements = project.statements(file).unwrap();
        let list = project.statement_list(file).unwrap();

        let parse = ScriptParser.parse("b;").unwrap();
        let mut tx = Transaction::new(file);
        let new_list = parse.tree().root().child(0).unwrap();
        tx.rebind(&project, file, parse.tree().root()).unwrap();
        tx.rebind(&project, list, new_list).unwrap();
        tx.forget(statements[0]);
        tx.rebind(&project, statements[1], new_list.child(0).unwrap()).unwrap();
        project.commit(parse, tx).unwrap();

        assert_eq!(project.full_text(file).unwrap(), "b;");
        assert!(project.was_forgotten(statements[0]));
        assert_eq!(project.text(statements[1]).unwrap(), "b;");
        assert_eq!(project.statements(file).unwrap(), [statements[1]]);
    }
}
