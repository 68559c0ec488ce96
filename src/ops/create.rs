//! Node creation: directories, empty files and url bookmarks

use super::{delta_of, UrlOutcome};
use crate::error::FsError;
use crate::tree::node::{Node, NodeContent, NodeKind};
use crate::tree::size::byte_size;
use crate::tree::{path, FileTree};
use crate::types::{now, NodeId};

impl FileTree {
    /// Create an empty directory or file at `(location, name)`.
    ///
    /// Fails when any node already holds the name. Url bookmarks are created
    /// through [`FileTree::set_url`], which needs a target.
    pub fn create(&mut self, location: &str, name: &str, kind: NodeKind) -> Result<NodeId, FsError> {
        let dir = self.require_location(location)?;
        let name = path::validate_name(name)?;
        if self.child_named(dir, &name).is_some() {
            return Err(FsError::AlreadyExists {
                kind: kind.into(),
                name,
            });
        }

        let at = now();
        let id = self.alloc_id();
        let node = match kind {
            NodeKind::Directory => Node::directory(id, name, Some(dir), at),
            NodeKind::File => Node::file(id, name, dir, String::new(), at),
            NodeKind::Url => {
                return Err(FsError::Rejected(
                    "Url bookmarks are created with seturl".to_string(),
                ))
            }
        };
        self.attach(node)?;
        self.touch(dir, at);
        Ok(id)
    }

    /// Point a url bookmark at `url`, creating it when the name is free.
    pub fn set_url(&mut self, location: &str, name: &str, url: &str) -> Result<UrlOutcome, FsError> {
        let dir = self.require_location(location)?;
        let name = path::validate_name(name)?;
        url::Url::parse(url).map_err(|_| FsError::InvalidUrl(url.to_string()))?;

        let at = now();
        let new_size = byte_size(url);
        if let Some(existing) = self.child_named(dir, &name) {
            let id = existing.id;
            if existing.kind() != NodeKind::Url {
                return Err(FsError::AlreadyExists {
                    kind: existing.kind().into(),
                    name,
                });
            }
            let old_size = existing.size;
            if let Some(node) = self.get_mut(id) {
                node.content = NodeContent::Url {
                    url: url.to_string(),
                };
                node.size = new_size;
                node.last_modified = at;
            }
            self.propagate_from(dir, delta_of(new_size) - delta_of(old_size), Some(at));
            return Ok(UrlOutcome::Updated);
        }

        let id = self.alloc_id();
        self.attach(Node::url(id, name, dir, url.to_string(), at))?;
        self.touch(dir, at);
        self.propagate_from(dir, delta_of(new_size), Some(at));
        Ok(UrlOutcome::Created)
    }
}
