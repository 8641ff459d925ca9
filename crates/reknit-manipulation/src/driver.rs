//! Applies an [`Edit`] to a source file: new text, new tree, reconciled
//! wrappers, or nothing at all.

use reknit_errors::{Renderer, format_diagnostics};
use reknit_project::{InvalidReconciliation, Node, NodeError, Project};
use reknit_syntax::ParseFailure;

use crate::error::{ManipulationDetails, ManipulationError};
use crate::handlers::NodeHandler;
use crate::{Edit, Reconciler, handler_for};

pub trait Manipulate {
    /// Replaces the text of `file` as described by `edit` and moves every
    /// wrapper of the file onto the re-parsed tree.
    ///
    /// On failure the file keeps its old tree and every wrapper stays bound
    /// where it was.
    fn apply_edit(&mut self, file: Node, edit: Edit) -> Result<Node, ManipulationError>;
}

#[derive(Debug, thiserror::Error)]
enum Failure {
    #[error(transparent)]
    Parse(#[from] ParseFailure),
    #[error("the new text has {new} syntax errors where the old one had {old}")]
    MoreDiagnostics { old: usize, new: usize },
    #[error(transparent)]
    Reconciliation(#[from] InvalidReconciliation),
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl Manipulate for Project {
    fn apply_edit(&mut self, file: Node, edit: Edit) -> Result<Node, ManipulationError> {
        let Edit { text, kind } = edit;
        self.tree(file)?;
        let mut handler = handler_for(self, file, kind)?;

        let old_text = self.full_text(file)?.to_owned();
        let new_text = text.new_text(&old_text)?;

        let Err(failure) = try_apply(self, file, &new_text, &mut handler) else {
            return Ok(file);
        };

        let path = self.path(file)?.to_owned();
        let snippet = text.error_snippet(&new_text);
        let diagnostics = self.parser().syntactic_diagnostics(&new_text);
        tracing::debug!(%path, %failure, diagnostics = diagnostics.len(), "manipulation failed");

        let error = if diagnostics.is_empty() {
            let details = ManipulationDetails::new(path, old_text, new_text, snippet);
            ManipulationError::Failed { message: failure.to_string(), details: Box::new(details) }
        } else {
            let renderer = Renderer::plain();
            let diagnostics = format_diagnostics(&diagnostics, &renderer, path.as_str(), &new_text).to_string();
            let details = ManipulationDetails::new(path, old_text, new_text, snippet);
            ManipulationError::SyntaxErrorIntroduced { diagnostics, details: Box::new(details) }
        };
        Err(error)
    }
}

fn try_apply(
    project: &mut Project,
    file: Node,
    new_text: &str,
    handler: &mut dyn NodeHandler,
) -> Result<(), Failure> {
    let parse = project.parser().parse(new_text)?;
    let old = project.diagnostics(file)?.len();
    let new = parse.diagnostics().len();
    if new > old {
        return Err(Failure::MoreDiagnostics { old, new });
    }

    let tx = {
        let mut cx = Reconciler::new(project, file, parse.tree())?;
        let (old_root, new_root) = (cx.old_root(), cx.new_root());
        handler.handle_node(&mut cx, old_root, new_root)?;
        cx.finish()
    };
    project.commit(parse, tx)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use reknit_parse::ScriptParser;

    use super::*;
    use crate::EditKind;
    use crate::text::{FullReplacement, Insertion};

    #[test]
    fn successful_edit_swaps_the_tree() {
        let mut project = Project::new(ScriptParser);
        let file = project.add_source_file("main.rk", "a;").unwrap();

        let edit = Edit::new(Insertion::new(2.into(), " b;"), EditKind::BestEffort);
        assert_eq!(project.apply_edit(file, edit).unwrap(), file);
        assert_eq!(project.full_text(file).unwrap(), "a; b;");
    }

    #[test]
    fn reconciliation_failure_keeps_old_tree() {
        let mut project = Project::new(ScriptParser);
        let file = project.add_source_file("main.rk", "a;").unwrap();
        let statement = project.statements(file).unwrap()[0];

        let error = project
            .apply_edit(file, Edit::new(FullReplacement::new("a; b;"), EditKind::Straight))
            .unwrap_err();

        let ManipulationError::Failed { message, details } = &error else {
            panic!("expected a generic failure, got {error:?}");
        };
        assert!(message.contains("children"), "{message}");
        assert_eq!(details.new_text, "a; b;");
        assert_eq!(project.full_text(file).unwrap(), "a;");
        assert_eq!(project.text(statement).unwrap(), "a;");
    }

    #[test]
    fn forgotten_files_are_rejected_up_front() {
        let mut project = Project::new(ScriptParser);
        let file = project.add_source_file("main.rk", "a;").unwrap();
        project.remove_file(file).unwrap();

        let error = project.apply_edit(file, Edit::new(FullReplacement::new("b;"), EditKind::BestEffort));
        assert!(matches!(error, Err(ManipulationError::Node(NodeError::Forgotten))));
    }
}
