//! notepub - Export and publish tagged note collections
//!
//! Reads a folder of plain-text notes, groups them into a tree by their
//! hierarchical tags, and renders that tree or the flat note list as note
//! files, tab-delimited data, XML, OPML, HTML outlines, browser bookmarks
//! and column-paginated favorites pages.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NotepubError;
