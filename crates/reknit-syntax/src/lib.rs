//! Immutable, parent-linked syntax trees produced by one full parse of a file.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`]. Tokens are leaf
//! nodes, and comma or statement runs are grouped under synthetic
//! [`SyntaxKind::SYNTAX_LIST`] nodes so every child sequence can be walked
//! uniformly.

mod builder;
mod parse;
mod syntax_kind;
mod syntax_set;
mod tree;
mod walk;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Boundary to whatever produces trees from text.
pub use parse::{Parse, ParseFailure, SourceParser};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};
/// Tree storage and borrowed node handles.
pub use tree::{NodeId, SyntaxNode, SyntaxTree};
/// Control flow for visitor-style walks.
pub use walk::WalkControl;
