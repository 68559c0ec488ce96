//! File content and open

use super::{delta_of, Opened};
use crate::error::FsError;
use crate::tree::node::{KindFilter, NodeContent};
use crate::tree::size::byte_size;
use crate::tree::FileTree;
use crate::types::now;

impl FileTree {
    /// Replace a file's content and propagate the size change.
    pub fn set_content(&mut self, location: &str, name: &str, content: &str) -> Result<(), FsError> {
        let dir = self.require_location(location)?;
        let (id, old_size) = self
            .child_named(dir, name)
            .filter(|n| KindFilter::File.accepts(n.kind()))
            .map(|n| (n.id, n.size))
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::File,
                name: name.to_string(),
            })?;

        let at = now();
        let new_size = byte_size(content);
        if let Some(node) = self.get_mut(id) {
            node.content = NodeContent::File {
                content: content.to_string(),
            };
            node.size = new_size;
            node.last_modified = at;
        }
        self.propagate_from(dir, delta_of(new_size) - delta_of(old_size), Some(at));
        Ok(())
    }

    /// Content of a file or target of a url bookmark.
    pub fn open(&self, location: &str, name: &str) -> Result<Opened, FsError> {
        let dir = self.require_location(location)?;
        let node = self.child_named(dir, name);
        match node.map(|n| (n.name.clone(), &n.content)) {
            Some((name, NodeContent::File { content })) => Ok(Opened::File {
                name,
                content: content.clone(),
            }),
            Some((name, NodeContent::Url { url })) => Ok(Opened::Url {
                name,
                url: url.clone(),
            }),
            _ => Err(FsError::NotFound {
                kind: KindFilter::File,
                name: name.to_string(),
            }),
        }
    }
}
