//! Tag tree: notes grouped under their hierarchical tags
//!
//! The tree is stored as an arena of nodes addressed by index. Each node keeps
//! links to its parent, first child and next sibling, so both recursive
//! (sibling chain) and iterative (pre-order "next node") traversal are cheap.
//!
//! # Examples
//!
//! ```
//! use notepub::domain::note::Note;
//! use notepub::domain::tags::{NodeKind, TagTree};
//!
//! let notes = vec![Note::new().with_field("Title", "Rust").with_field("Tags", "Tech.Lang")];
//! let tree = TagTree::from_notes(&notes, ',');
//! let levels: Vec<usize> = tree.walk().map(|id| tree.node(id).level).collect();
//! assert_eq!(levels, vec![1, 2, 3]);
//! assert!(matches!(tree.node(3).kind, NodeKind::Item { note: 0 }));
//! ```

use super::spec::{split_tags, tag_levels};
use crate::domain::note::Note;

/// Index of a node inside a [`TagTree`]
pub type NodeId = usize;

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The single root; never emitted itself
    Root,
    /// One level of a tag
    Tag { name: String },
    /// A leaf referencing a note by its index in the collection
    Item { note: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    last_child: Option<NodeId>,
    /// Depth from the root (root = 0)
    pub level: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Tag name, if this is a tag node
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tag { name } => Some(name),
            _ => None,
        }
    }
}

/// Ordered multi-way tree of tags and note items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTree {
    nodes: Vec<Node>,
}

impl Default for TagTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTree {
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only the root
    pub fn new() -> Self {
        TagTree {
            nodes: vec![Node {
                parent: None,
                first_child: None,
                next_sibling: None,
                last_child: None,
                level: 0,
                kind: NodeKind::Root,
            }],
        }
    }

    /// Build a tree from a note collection, in collection order
    pub fn from_notes(notes: &[Note], separator: char) -> Self {
        let mut tree = Self::new();
        for (index, note) in notes.iter().enumerate() {
            tree.add_note(index, note.tags(), separator);
        }
        tree
    }

    /// Build a tree from a subset of a collection, keeping the original note indices
    pub fn from_selected(notes: &[Note], selected: &[usize], separator: char) -> Self {
        let mut tree = Self::new();
        for &index in selected {
            if let Some(note) = notes.get(index) {
                tree.add_note(index, note.tags(), separator);
            }
        }
        tree
    }

    /// File a note under every tag path in its tag string.
    ///
    /// Existing tag nodes are matched case-insensitively; the first spelling wins.
    pub fn add_note(&mut self, note: usize, tags: &str, separator: char) {
        for tag in split_tags(tags, separator) {
            let mut parent = Self::ROOT;
            for level in tag_levels(&tag) {
                parent = self.add_tag(parent, level);
            }

            let already_filed = self
                .children(parent)
                .any(|id| self.nodes[id].kind == NodeKind::Item { note });
            if parent != Self::ROOT && !already_filed {
                self.append(parent, NodeKind::Item { note });
            }
        }
    }

    /// The child tag of `parent` named `name`, created if missing.
    ///
    /// A tag added this way may stay childless.
    pub fn add_tag(&mut self, parent: NodeId, name: &str) -> NodeId {
        match self.child_tag(parent, name) {
            Some(existing) => existing,
            None => self.append(
                parent,
                NodeKind::Tag {
                    name: name.to_string(),
                },
            ),
        }
    }

    fn child_tag(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| {
            self.nodes[id]
                .tag_name()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        let level = self.nodes[parent].level + 1;
        self.nodes.push(Node {
            parent: Some(parent),
            first_child: None,
            next_sibling: None,
            last_child: None,
            level,
            kind,
        });

        match self.nodes[parent].last_child {
            Some(last) => self.nodes[last].next_sibling = Some(id),
            None => self.nodes[parent].first_child = Some(id),
        }
        self.nodes[parent].last_child = Some(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Children of a node, following the sibling chain
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes.get(id).and_then(|n| n.first_child),
        }
    }

    /// Next node in document (pre-order) order after `id`
    pub fn next_node(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(child) = node.first_child {
            return Some(child);
        }

        let mut current = id;
        loop {
            let node = &self.nodes[current];
            if let Some(sibling) = node.next_sibling {
                return Some(sibling);
            }
            current = node.parent?;
        }
    }

    /// Every node except the root, in document order
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            next: self.next_node(Self::ROOT),
        }
    }

    /// Tag names from the top level down to `id` (inclusive)
    pub fn tag_path(&self, id: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = &self.nodes[cur];
            if let Some(name) = node.tag_name() {
                path.push(name);
            }
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a TagTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current].next_sibling;
        Some(current)
    }
}

/// Pre-order iterator over the whole tree
pub struct Walk<'a> {
    tree: &'a TagTree,
    next: Option<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_node(current);
        Some(current)
    }
}
