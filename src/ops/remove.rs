//! Node removal

use super::delta_of;
use crate::error::FsError;
use crate::tree::node::{KindFilter, NodeKind};
use crate::tree::FileTree;
use crate::types::now;

impl FileTree {
    /// Remove the node at `(location, name)`.
    ///
    /// `NodeKind::File` removes a file or a url bookmark; `NodeKind::Directory`
    /// removes an empty directory only. Returns the kind actually removed.
    pub fn remove(&mut self, location: &str, name: &str, kind: NodeKind) -> Result<NodeKind, FsError> {
        let dir = self.require_location(location)?;
        let accepts = |found: NodeKind| match kind {
            NodeKind::File => matches!(found, NodeKind::File | NodeKind::Url),
            other => other == found,
        };
        let node = self
            .child_named(dir, name)
            .filter(|n| accepts(n.kind()))
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::from(kind),
                name: name.to_string(),
            })?;
        let (id, size, found) = (node.id, node.size, node.kind());
        if node.children().is_some_and(|c| !c.is_empty()) {
            return Err(FsError::NotEmpty {
                name: node.name.clone(),
            });
        }

        let at = now();
        self.detach(id);
        self.touch(dir, at);
        self.propagate_from(dir, -delta_of(size), Some(at));
        Ok(found)
    }
}
