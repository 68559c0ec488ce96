//! Projection between the arena and flat `(location, name)` records

use super::node::{Node, NodeContent};
use super::{path, FileTree, HOME_ID};
use crate::error::StorageError;
use crate::store::{DirectoryRecord, FileRecord, UrlRecord, UserData};
use crate::types::{NodeId, Timestamp};
use std::collections::VecDeque;

impl FileTree {
    /// Rebuild a tree from stored records.
    ///
    /// Records that name a missing parent, collide with a sibling or carry an
    /// invalid name make the whole record corrupt.
    pub fn from_records(owner: &str, data: &UserData) -> Result<Self, StorageError> {
        let mut tree = FileTree::new(owner);

        let mut directories: Vec<&DirectoryRecord> = data.directories.iter().collect();
        directories.sort_by_key(|d| (path::segments(&d.location).len(), d.location.clone()));
        for dir in directories {
            let parent = tree.parent_for(owner, &dir.location)?;
            let name = tree.record_name(owner, &dir.name)?;
            let id = tree.alloc_id();
            let mut node = Node::directory(id, name, Some(parent), dir.last_modified);
            node.size = dir.size;
            tree.attach_record(owner, node)?;
        }

        for file in &data.files {
            let parent = tree.parent_for(owner, &file.location)?;
            let name = tree.record_name(owner, &file.name)?;
            let id = tree.alloc_id();
            let node = Node::file(id, name, parent, file.content.clone(), file.last_modified);
            tree.attach_record(owner, node)?;
        }

        for url in &data.urls {
            let parent = tree.parent_for(owner, &url.location)?;
            let name = tree.record_name(owner, &url.name)?;
            let id = tree.alloc_id();
            let node = Node::url(id, name, parent, url.url.clone(), url.last_modified);
            tree.attach_record(owner, node)?;
        }

        Ok(tree)
    }

    /// Flatten the tree into records, breadth-first in name order.
    pub fn to_records(&self) -> UserData {
        let mut data = UserData::default();
        let mut queue: VecDeque<NodeId> = VecDeque::from([HOME_ID]);
        while let Some(dir) = queue.pop_front() {
            let location = self.full_path(dir);
            for child in self.children(dir) {
                let name = child.name.clone();
                let location = location.clone();
                let (size, last_modified): (u64, Timestamp) = (child.size, child.last_modified);
                match &child.content {
                    NodeContent::Directory { .. } => {
                        data.directories.push(DirectoryRecord {
                            name,
                            location,
                            size,
                            last_modified,
                        });
                        queue.push_back(child.id);
                    }
                    NodeContent::File { content } => data.files.push(FileRecord {
                        name,
                        location,
                        content: content.clone(),
                        size,
                        last_modified,
                    }),
                    NodeContent::Url { url } => data.urls.push(UrlRecord {
                        name,
                        location,
                        url: url.clone(),
                        size,
                        last_modified,
                    }),
                }
            }
        }
        data
    }

    fn parent_for(&self, owner: &str, location: &str) -> Result<NodeId, StorageError> {
        self.resolve_location(location)
            .ok_or_else(|| StorageError::Corrupted {
                username: owner.to_string(),
                reason: format!("missing parent directory {}", location),
            })
    }

    fn record_name(&self, owner: &str, name: &str) -> Result<String, StorageError> {
        path::validate_name(name).map_err(|e| StorageError::Corrupted {
            username: owner.to_string(),
            reason: e.to_string(),
        })
    }

    fn attach_record(&mut self, owner: &str, node: Node) -> Result<(), StorageError> {
        let name = node.name.clone();
        self.attach(node)
            .map(|_| ())
            .map_err(|_| StorageError::Corrupted {
                username: owner.to_string(),
                reason: format!("duplicate name {}", name),
            })
    }
}
