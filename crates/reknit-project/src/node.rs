use std::fmt;

use reknit_syntax::{NodeId, SyntaxKind, TextRange};

use crate::arena::Idx;
use crate::kinds::{Capabilities, NodeClass};

/// Long-lived handle to a wrapped syntax node.
///
/// Handles are plain indices into the owning [`Project`](crate::Project), so
/// two handles are the same wrapper exactly when they compare equal. A handle
/// stays valid after its wrapper is forgotten; queries then fail with
/// [`NodeError::Forgotten`](crate::NodeError::Forgotten).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(pub(crate) Idx<NodeSlot>);

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:?})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    Bound(NodeId),
    Forgotten,
}

/// Position dependent data computed on demand and dropped on every rebind.
#[derive(Debug, Default)]
pub(crate) struct Derived {
    pub(crate) string_literals: Option<Box<[TextRange]>>,
    pub(crate) comments: Option<Box<[TextRange]>>,
}

pub(crate) struct NodeSlot {
    pub(crate) kind: SyntaxKind,
    pub(crate) class: NodeClass,
    pub(crate) capabilities: Capabilities,
    /// `None` for the source file wrapper itself.
    pub(crate) source_file: Option<Node>,
    pub(crate) binding: Binding,
    pub(crate) derived: Derived,
}

impl NodeSlot {
    pub(crate) fn bind(&mut self, id: NodeId) {
        self.binding = Binding::Bound(id);
        self.derived = Derived::default();
    }

    pub(crate) fn forget(&mut self) {
        self.binding = Binding::Forgotten;
        self.derived = Derived::default();
    }

    pub(crate) fn source_file(&self, this: Node) -> Node {
        self.source_file.unwrap_or(this)
    }
}
