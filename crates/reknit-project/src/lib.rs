//! Identity-stable wrappers over immutable syntax trees.
//!
//! A [`Project`] owns source files and hands out [`Node`] handles for their
//! syntax nodes. Trees are never edited in place: every edit produces a new
//! tree, and a [`Transaction`] records which old wrappers move onto which new
//! nodes and which are forgotten. [`Project::commit`] applies it in one step.

use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

mod arena;
mod cache;
mod error;
mod events;
mod kinds;
mod navigation;
mod node;
mod project;
mod settings;
mod transaction;

pub use cache::Kept;
pub use error::{InvalidReconciliation, NodeError, ProjectError};
pub use events::FileEvent;
pub use kinds::{Capabilities, Descriptor, NodeClass, descriptor};
pub use node::Node;
pub use project::Project;
pub use settings::ManipulationSettings;
pub use transaction::{Checkpoint, Decision, Transaction};

pub(crate) type FxIndexSet<T> = indexmap::IndexSet<T, BuildHasherDefault<FxHasher>>;
