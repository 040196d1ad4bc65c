//! List tags use case

use crate::domain::tags::{NodeKind, TagTree};
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::repository::NoteRepository;
use crate::infrastructure::FileSystemRepository;

/// One tag of the collection's tag tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    /// Depth in the tree, 1 for top-level tags
    pub level: usize,
    pub name: String,
    /// Notes filed directly under this tag
    pub notes: usize,
}

/// Service for listing the collection's tags as an outline.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> Result<Vec<TagSummary>> {
        let config = self.repository.load_config()?;
        let notes = self.repository.load_notes();
        Ok(summarize(&notes, config.tag_separator()))
    }
}

/// Tags of `notes` in tree order
pub fn summarize(notes: &[Note], separator: char) -> Vec<TagSummary> {
    let tree = TagTree::from_notes(notes, separator);
    tree.walk()
        .filter_map(|id| {
            let node = tree.node(id);
            let name = node.tag_name()?;
            let notes = tree
                .children(id)
                .filter(|&child| matches!(tree.node(child).kind, NodeKind::Item { .. }))
                .count();
            Some(TagSummary {
                level: node.level,
                name: name.to_string(),
                notes,
            })
        })
        .collect()
}
