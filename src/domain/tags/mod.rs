//! Tag system

pub mod spec;
pub mod tree;

// Re-export main types
pub use spec::{join_tags, split_tags, tag_levels, TagSpec, DEFAULT_SEPARATOR};
pub use tree::{Node, NodeId, NodeKind, TagTree};
