//! Size accounting
//!
//! A directory's size is the sum of its children's sizes. Mutations keep that
//! true by pushing a signed delta up the ancestor chain instead of
//! recomputing subtrees. Home is not a sized node: propagation stops there.

use super::{path, FileTree, HOME_ID};
use crate::error::FsError;
use crate::tree::node::KindFilter;
use crate::types::{NodeId, Timestamp};
use serde::{Deserialize, Serialize};

/// Byte size of file content or a url, counted as UTF-8
pub fn byte_size(text: &str) -> u64 {
    text.len() as u64
}

/// A directory whose recorded size disagrees with its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMismatch {
    pub path: String,
    pub recorded: u64,
    pub expected: u64,
}

impl FileTree {
    /// Add `delta` to every directory from `location` up to (not including) home.
    pub fn propagate_size_delta(&mut self, location: &str, delta: i64) -> Result<(), FsError> {
        let dir = self
            .resolve_location(location)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: path::normalize(location),
            })?;
        self.propagate_from(dir, delta, None);
        Ok(())
    }

    /// Walk from `dir` towards home applying `delta`; optionally stamp each
    /// touched directory with `at`.
    pub(crate) fn propagate_from(&mut self, dir: NodeId, delta: i64, at: Option<Timestamp>) {
        if delta == 0 {
            return;
        }
        let mut current = dir;
        while current != HOME_ID {
            let Some(node) = self.get_mut(current) else {
                tracing::warn!(node = %current, "size propagation reached a missing ancestor");
                return;
            };
            node.size = node.size.saturating_add_signed(delta);
            if let Some(at) = at {
                node.last_modified = at;
            }
            current = node.parent.unwrap_or(HOME_ID);
        }
    }

    /// Total size of everything below home
    pub fn total_size(&self) -> u64 {
        self.children(HOME_ID).iter().map(|n| n.size).sum()
    }

    /// Directories whose size is not the sum of their children's sizes
    pub fn verify_sizes(&self) -> Vec<SizeMismatch> {
        let mut mismatches: Vec<SizeMismatch> = self
            .nodes()
            .filter(|n| n.is_dir())
            .filter_map(|dir| {
                let expected: u64 = self.children(dir.id).iter().map(|c| c.size).sum();
                (expected != dir.size).then(|| SizeMismatch {
                    path: self.full_path(dir.id),
                    recorded: dir.size,
                    expected,
                })
            })
            .collect();
        mismatches.sort_by(|a, b| a.path.cmp(&b.path));
        mismatches
    }

    /// Recompute every directory size bottom-up; returns how many changed.
    pub fn recompute_sizes(&mut self) -> usize {
        let mut changed = 0;
        self.recompute_from(HOME_ID, &mut changed);
        changed
    }

    fn recompute_from(&mut self, id: NodeId, changed: &mut usize) -> u64 {
        let child_ids: Vec<NodeId> = match self.get(id).and_then(|n| n.children()) {
            Some(children) => children.values().copied().collect(),
            None => return self.get(id).map(|n| n.size).unwrap_or(0),
        };
        let total: u64 = child_ids
            .into_iter()
            .map(|child| self.recompute_from(child, changed))
            .sum();
        if id != HOME_ID {
            if let Some(node) = self.get_mut(id) {
                if node.size != total {
                    node.size = total;
                    *changed += 1;
                }
            }
        }
        total
    }
}
