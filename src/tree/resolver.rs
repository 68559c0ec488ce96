//! Path resolution over a user's tree

use super::node::{KindFilter, Node};
use super::{path, FileTree, HOME_ID};
use crate::error::FsError;
use crate::types::NodeId;
use unicode_normalization::UnicodeNormalization;

impl FileTree {
    /// Directory named by an absolute location, if it exists in this tree.
    ///
    /// The location must start at this tree's home; every segment must name
    /// a directory.
    pub fn resolve_location(&self, location: &str) -> Option<NodeId> {
        let segments = path::segments(location);
        let (first, rest) = segments.split_first()?;
        if *first != self.owner() {
            return None;
        }
        let mut current = HOME_ID;
        for segment in rest {
            let name: String = segment.nfc().collect();
            let child = *self.get(current)?.children()?.get(&name)?;
            if !self.get(child)?.is_dir() {
                return None;
            }
            current = child;
        }
        Some(current)
    }

    /// Node at `(location, name)` when its kind matches `kind`.
    ///
    /// Names are unique across kinds within a directory, so at most one node
    /// can match; the filter only decides whether that node is accepted.
    pub fn find_node(&self, location: &str, name: &str, kind: KindFilter) -> Option<&Node> {
        let dir = self.resolve_location(location)?;
        self.child_named(dir, name)
            .filter(|node| kind.accepts(node.kind()))
    }

    /// Node with the given full path, `None` for home or a missing path
    pub fn lookup_path(&self, full_path: &str) -> Option<&Node> {
        let (location, name) = path::split_last(full_path)?;
        self.find_node(&location, &name, KindFilter::Any)
    }

    pub(crate) fn child_named(&self, dir: NodeId, name: &str) -> Option<&Node> {
        let name: String = name.nfc().collect();
        let id = self.get(dir)?.children()?.get(&name)?;
        self.get(*id)
    }

    /// Resolve a location that an operation is about to act in.
    ///
    /// Locations outside home are `OutOfScope`; locations inside home that do
    /// not name a directory are `NotFound`.
    pub(crate) fn require_location(&self, location: &str) -> Result<NodeId, FsError> {
        if !path::is_within(location, &self.home()) {
            return Err(FsError::OutOfScope {
                path: location.to_string(),
            });
        }
        self.resolve_location(location)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: path::segments(location)
                    .last()
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            })
    }

    /// Resolve a move destination typed relative to `location`.
    pub(crate) fn resolve_destination(
        &self,
        location: &str,
        destination: &str,
    ) -> Result<(String, NodeId), FsError> {
        let target = path::resolve(location, destination)?;
        if !path::is_within(&target, &self.home()) {
            return Err(FsError::OutOfScope { path: target });
        }
        let id = self
            .resolve_location(&target)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: destination.to_string(),
            })?;
        Ok((target, id))
    }
}
