//! Per-user file tree
//!
//! Nodes live in an arena keyed by [`NodeId`]. Every directory owns a
//! name-indexed map of its children, so sibling names are unique across
//! directories, files and url bookmarks by construction. Full paths are
//! computed on demand by walking parent links up to the home directory.

pub mod node;
pub mod path;
pub mod records;
pub mod resolver;
pub mod size;

use crate::error::FsError;
use crate::types::{NodeId, Timestamp};
use node::{KindFilter, Node};
use std::collections::HashMap;

/// Arena id of the home directory, `/{owner}`
pub const HOME_ID: NodeId = NodeId(0);

/// One user's file system
#[derive(Debug, Clone)]
pub struct FileTree {
    owner: String,
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl FileTree {
    /// Create an empty tree holding only the home directory
    pub fn new(owner: &str) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            HOME_ID,
            Node::directory(HOME_ID, owner.to_string(), None, crate::types::now()),
        );
        Self {
            owner: owner.to_string(),
            nodes,
            next_id: 1,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Home directory location, `/{owner}`
    pub fn home(&self) -> String {
        path::home_of(&self.owner)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Number of nodes below home
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodes below home, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.id != HOME_ID)
    }

    /// Children of a directory, ordered by name
    pub fn children(&self, dir: NodeId) -> Vec<&Node> {
        self.get(dir)
            .and_then(Node::children)
            .map(|children| children.values().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Full path of a node: its location joined with its name
    pub fn full_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            names.push(node.name.as_str());
            current = node.parent.and_then(|p| self.get(p));
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Location of a node: the full path of its parent directory
    pub fn location_of(&self, id: NodeId) -> Option<String> {
        self.get(id)?.parent.map(|parent| self.full_path(parent))
    }

    /// Whether `id` is `ancestor` or lies somewhere below it
    pub fn is_descendant_or_self(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.get(node_id).and_then(|n| n.parent);
        }
        false
    }

    pub(crate) fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a node into the arena and its parent's child index.
    pub(crate) fn attach(&mut self, node: Node) -> Result<NodeId, FsError> {
        let id = node.id;
        let parent_id = node.parent.unwrap_or(HOME_ID);
        let name = node.name.clone();
        let kind = node.kind();
        let children = self
            .get_mut(parent_id)
            .and_then(Node::children_mut)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: parent_id.to_string(),
            })?;
        if children.contains_key(&name) {
            return Err(FsError::AlreadyExists {
                kind: kind.into(),
                name,
            });
        }
        children.insert(name, id);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node from its parent's child index, keeping it in the arena.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let Some((parent, name)) = self.get(id).map(|n| (n.parent, n.name.clone())) else {
            return;
        };
        if let Some(children) = parent
            .and_then(|p| self.get_mut(p))
            .and_then(Node::children_mut)
        {
            children.remove(&name);
        }
    }

    /// Insert an unlinked node under `parent` using its current name.
    pub(crate) fn link(&mut self, id: NodeId, parent: NodeId) -> Result<(), FsError> {
        let name = match self.get(id) {
            Some(node) => node.name.clone(),
            None => return Ok(()),
        };
        let children = self
            .get_mut(parent)
            .and_then(Node::children_mut)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: parent.to_string(),
            })?;
        if children.contains_key(&name) {
            return Err(FsError::AlreadyExists {
                kind: KindFilter::Any,
                name,
            });
        }
        children.insert(name, id);
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Unlink a leaf node and drop it from the arena.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<Node> {
        self.unlink(id);
        self.nodes.remove(&id)
    }

    pub(crate) fn touch(&mut self, id: NodeId, at: Timestamp) {
        if let Some(node) = self.get_mut(id) {
            node.last_modified = at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::NodeKind;

    #[test]
    fn test_new_tree_has_only_home() {
        let tree = FileTree::new("alice");
        assert!(tree.is_empty());
        assert_eq!(tree.home(), "/alice");
        assert_eq!(tree.full_path(HOME_ID), "/alice");
    }

    #[test]
    fn test_full_path_and_location() {
        let mut tree = FileTree::new("alice");
        let docs = tree.create("/alice", "docs", NodeKind::Directory).unwrap();
        let note = tree.create("/alice/docs", "note.txt", NodeKind::File).unwrap();
        assert_eq!(tree.full_path(docs), "/alice/docs");
        assert_eq!(tree.full_path(note), "/alice/docs/note.txt");
        assert_eq!(tree.location_of(note).as_deref(), Some("/alice/docs"));
        assert_eq!(tree.location_of(HOME_ID), None);
    }

    #[test]
    fn test_is_descendant_or_self() {
        let mut tree = FileTree::new("alice");
        let a = tree.create("/alice", "a", NodeKind::Directory).unwrap();
        let b = tree.create("/alice/a", "b", NodeKind::Directory).unwrap();
        let c = tree.create("/alice", "c", NodeKind::Directory).unwrap();
        assert!(tree.is_descendant_or_self(b, a));
        assert!(tree.is_descendant_or_self(a, a));
        assert!(!tree.is_descendant_or_self(c, a));
    }

    #[test]
    fn test_children_ordered_by_name() {
        let mut tree = FileTree::new("alice");
        tree.create("/alice", "zeta", NodeKind::File).unwrap();
        tree.create("/alice", "alpha", NodeKind::Directory).unwrap();
        let names: Vec<_> = tree
            .children(HOME_ID)
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
