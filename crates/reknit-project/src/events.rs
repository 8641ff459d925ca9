use camino::Utf8PathBuf;

use crate::Node;

/// Notification fired when a source file wrapper is created or forgotten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Added { file: Node, path: Utf8PathBuf },
    Removed { file: Node, path: Utf8PathBuf },
}

impl FileEvent {
    pub fn file(&self) -> Node {
        match self {
            Self::Added { file, .. } | Self::Removed { file, .. } => *file,
        }
    }
}

pub(crate) type Observer = Box<dyn FnMut(&FileEvent)>;
