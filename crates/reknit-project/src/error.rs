use camino::Utf8PathBuf;
use reknit_syntax::{ParseFailure, SyntaxKind, TextRange};

use crate::Capabilities;

/// Failure of a query or operation on a single wrapper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// The wrapper was forgotten, either explicitly or because an edit
    /// removed the node it stood for.
    #[error("operation on a forgotten node")]
    Forgotten,
    #[error("{kind:?} does not support {capability:?}")]
    MissingCapability { kind: SyntaxKind, capability: Capabilities },
    #[error("expected a source file, found {kind:?}")]
    NotASourceFile { kind: SyntaxKind },
    #[error("a forgotten node cannot be kept")]
    KeepForgotten,
    #[error("{kind:?} has no child of kind {expected:?}")]
    MissingChild { kind: SyntaxKind, expected: SyntaxKind },
    #[error("{kind:?} is not inside a syntax list")]
    NotInList { kind: SyntaxKind },
    #[error("index {index} is out of bounds for a list of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{kind:?} belongs to another source file")]
    OtherFile { kind: SyntaxKind },
}

/// The assumed correspondence between an old and a new tree broke down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReconciliation {
    #[error("cannot reconcile {old:?} at {range:?} with a {new:?}; perhaps a syntax error was inserted")]
    KindMismatch { old: SyntaxKind, new: SyntaxKind, range: TextRange },
    #[error("{kind:?} had {old} children but now has {new}")]
    ChildCountMismatch { kind: SyntaxKind, old: usize, new: usize },
    #[error("{kind:?} has {count} new children left over after pairing")]
    LeftoverNewChildren { kind: SyntaxKind, count: usize },
    #[error("{kind:?} ran out of new children while pairing")]
    MissingNewChild { kind: SyntaxKind },
    #[error("{kind:?} wrapper received two different decisions")]
    ConflictingDecision { kind: SyntaxKind },
    #[error("two wrappers were bound to the same new {kind:?}")]
    NodeClaimedTwice { kind: SyntaxKind },
    #[error("{kind:?} wrapper at {range:?} was neither rebound nor forgotten")]
    Unreconciled { kind: SyntaxKind, range: TextRange },
    #[error("{kind:?} has no syntax list")]
    MissingSyntaxList { kind: SyntaxKind },
    #[error("expected a source file at the root, found {kind:?}")]
    NotASourceFile { kind: SyntaxKind },
    #[error("a forgotten {kind:?} wrapper cannot be rebound")]
    RebindForgotten { kind: SyntaxKind },
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("a source file already exists at {0}")]
    DuplicatePath(Utf8PathBuf),
    #[error("failed to parse {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: ParseFailure,
    },
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error(transparent)]
    Reconciliation(#[from] InvalidReconciliation),
}
