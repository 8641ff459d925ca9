//! Text edits that keep wrapper identity.
//!
//! An [`Edit`] pairs a text manipulator, which computes the new file text,
//! with an [`EditKind`] describing what the change does to the tree. After
//! re-parsing, the node handler chosen for the kind walks the old and new
//! trees side by side and decides, for every wrapper, whether it moves to a
//! new node or is forgotten.

mod cursor;
mod driver;
mod edit;
mod error;
mod factory;
pub mod handlers;
pub mod helpers;
mod reconciler;
pub mod text;

pub use cursor::DualCursor;
pub use driver::Manipulate;
pub use edit::{CustomMappings, Edit, EditKind};
pub use error::{ManipulationDetails, ManipulationError};
pub use factory::handler_for;
pub use reconciler::Reconciler;
