use camino::{Utf8Path, Utf8PathBuf};
use reknit_errors::Diagnostic;
use reknit_syntax::{NodeId, SourceParser, SyntaxKind, SyntaxNode, SyntaxTree};
use rustc_hash::FxHashMap;

use crate::arena::Arena;
use crate::events::{FileEvent, Observer};
use crate::node::{Binding, Derived, NodeSlot};
use crate::{FxIndexSet, ManipulationSettings, Node, NodeError, ProjectError, kinds};

pub(crate) struct FileData {
    pub(crate) path: Utf8PathBuf,
    pub(crate) tree: SyntaxTree,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Every live wrapper of the file, keyed by the node it is bound to.
    pub(crate) wrappers: FxHashMap<NodeId, Node>,
}

/// Owns the source files, their current trees and every wrapper handed out
/// for them.
pub struct Project {
    pub(crate) parser: Box<dyn SourceParser>,
    pub(crate) settings: ManipulationSettings,
    pub(crate) slots: Arena<NodeSlot>,
    pub(crate) files: FxHashMap<Node, FileData>,
    pub(crate) paths: FxHashMap<Utf8PathBuf, Node>,
    pub(crate) scopes: Vec<FxIndexSet<Node>>,
    pub(crate) observers: Vec<Observer>,
}

impl Project {
    pub fn new(parser: impl SourceParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            settings: ManipulationSettings::default(),
            slots: Arena::default(),
            files: FxHashMap::default(),
            paths: FxHashMap::default(),
            scopes: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: ManipulationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ManipulationSettings {
        &self.settings
    }

    pub fn parser(&self) -> &dyn SourceParser {
        &*self.parser
    }

    /// Registers a callback for source files being added and removed.
    pub fn subscribe(&mut self, observer: impl FnMut(&FileEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn emit(&mut self, event: &FileEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Parses `text` and wraps its root as a new source file.
    pub fn add_source_file(
        &mut self,
        path: impl Into<Utf8PathBuf>,
        text: &str,
    ) -> Result<Node, ProjectError> {
        let path = path.into();
        if self.paths.contains_key(&path) {
            return Err(ProjectError::DuplicatePath(path));
        }

        let parse = self
            .parser
            .parse(text)
            .map_err(|source| ProjectError::Parse { path: path.clone(), source })?;
        let (tree, diagnostics) = parse.into_parts();

        let descriptor = kinds::descriptor(SyntaxKind::SOURCE_FILE);
        let file = Node(self.slots.alloc(NodeSlot {
            kind: SyntaxKind::SOURCE_FILE,
            class: descriptor.class,
            capabilities: descriptor.capabilities,
            source_file: None,
            binding: Binding::Bound(NodeId::ROOT),
            derived: Derived::default(),
        }));

        let mut wrappers = FxHashMap::default();
        wrappers.insert(NodeId::ROOT, file);
        self.files.insert(file, FileData { path: path.clone(), tree, diagnostics, wrappers });
        self.paths.insert(path.clone(), file);

        tracing::debug!(%path, "added source file");
        self.emit(&FileEvent::Added { file, path });
        Ok(file)
    }

    pub fn source_file(&self, path: &Utf8Path) -> Option<Node> {
        self.paths.get(path).copied()
    }

    pub fn source_files(&self) -> impl Iterator<Item = Node> + '_ {
        self.files.keys().copied()
    }

    /// Forgets a source file and every wrapper created for it.
    pub fn remove_file(&mut self, file: Node) -> Result<(), NodeError> {
        self.file_data(file)?;
        self.forget(file);
        Ok(())
    }

    pub(crate) fn file_data(&self, file: Node) -> Result<&FileData, NodeError> {
        match self.files.get(&file) {
            Some(data) => Ok(data),
            None if self.was_forgotten(file) => Err(NodeError::Forgotten),
            None => Err(NodeError::NotASourceFile { kind: self.kind(file) }),
        }
    }

    pub fn path(&self, file: Node) -> Result<&Utf8Path, NodeError> {
        Ok(&self.file_data(file)?.path)
    }

    /// The current tree of `file`. It is replaced wholesale by every edit.
    pub fn tree(&self, file: Node) -> Result<&SyntaxTree, NodeError> {
        Ok(&self.file_data(file)?.tree)
    }

    pub fn full_text(&self, file: Node) -> Result<&str, NodeError> {
        Ok(self.tree(file)?.text())
    }

    /// Syntax errors reported by the parse that produced the current tree.
    pub fn diagnostics(&self, file: Node) -> Result<&[Diagnostic], NodeError> {
        Ok(&self.file_data(file)?.diagnostics)
    }

    /// The source file a wrapper belongs to; a source file is its own.
    pub fn source_file_of(&self, node: Node) -> Node {
        self.slots[node.0].source_file(node)
    }

    pub(crate) fn bound_id(&self, node: Node) -> Result<NodeId, NodeError> {
        match self.slots[node.0].binding {
            Binding::Bound(id) => Ok(id),
            Binding::Forgotten => Err(NodeError::Forgotten),
        }
    }

    /// The syntax node a wrapper is currently bound to.
    pub fn syntax(&self, node: Node) -> Result<SyntaxNode<'_>, NodeError> {
        let id = self.bound_id(node)?;
        let tree = self.tree(self.source_file_of(node))?;
        Ok(tree.node(id))
    }

    /// Live wrappers of `file` with the nodes they are bound to.
    pub fn wrapped(&self, file: Node) -> Result<impl Iterator<Item = (NodeId, Node)> + '_, NodeError> {
        Ok(self.file_data(file)?.wrappers.iter().map(|(&id, &node)| (id, node)))
    }

    pub fn wrapper_count(&self, file: Node) -> Result<usize, NodeError> {
        Ok(self.file_data(file)?.wrappers.len())
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("files", &self.files.len())
            .field("wrappers", &self.slots.len())
            .field("scopes", &self.scopes.len())
            .finish_non_exhaustive()
    }
}
