//! Rename and move
//!
//! Both touch a single arena node. Descendants of a renamed or moved
//! directory keep their parent links, so their locations follow implicitly.

use super::delta_of;
use crate::error::FsError;
use crate::tree::node::KindFilter;
use crate::tree::{path, FileTree};
use crate::types::now;
use unicode_normalization::UnicodeNormalization;

impl FileTree {
    /// Rename the node at `(location, old_name)` to `new_name`.
    pub fn rename(&mut self, location: &str, old_name: &str, new_name: &str) -> Result<(), FsError> {
        let dir = self.require_location(location)?;
        let old_name: String = old_name.nfc().collect();
        let new_name = path::validate_name(new_name)?;
        if old_name == new_name {
            return Err(FsError::SameName);
        }
        let id = self
            .child_named(dir, &old_name)
            .map(|n| n.id)
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Any,
                name: old_name.clone(),
            })?;
        if self.child_named(dir, &new_name).is_some() {
            return Err(FsError::AlreadyExists {
                kind: KindFilter::Any,
                name: new_name,
            });
        }

        let at = now();
        self.unlink(id);
        if let Some(node) = self.get_mut(id) {
            node.name = new_name;
            node.last_modified = at;
        }
        self.link(id, dir)?;
        self.touch(dir, at);
        Ok(())
    }

    /// Move `(location, name)` into the directory named by `destination`.
    ///
    /// `destination` is absolute or relative to `location`. Returns the new
    /// location of the moved node.
    pub fn move_node(&mut self, location: &str, name: &str, destination: &str) -> Result<String, FsError> {
        let dir = self.require_location(location)?;
        let (id, size, is_dir, name) = self
            .child_named(dir, name)
            .map(|n| (n.id, n.size, n.is_dir(), n.name.clone()))
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Any,
                name: name.to_string(),
            })?;
        let (_, dest) = self.resolve_destination(location, destination)?;

        if is_dir && self.is_descendant_or_self(dest, id) {
            return Err(FsError::InvalidPath(
                "Cannot move a directory into itself".to_string(),
            ));
        }
        if self.child_named(dest, &name).is_some() {
            return Err(FsError::AlreadyExists {
                kind: KindFilter::Any,
                name,
            });
        }

        let at = now();
        self.unlink(id);
        if let Err(e) = self.link(id, dest) {
            self.link(id, dir)?;
            return Err(e);
        }
        self.touch(id, at);
        self.touch(dir, at);
        self.touch(dest, at);
        let delta = delta_of(size);
        self.propagate_from(dir, -delta, Some(at));
        self.propagate_from(dest, delta, Some(at));
        Ok(self.full_path(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::NodeKind;

    fn sample() -> FileTree {
        let mut tree = FileTree::new("alice");
        tree.create("/alice", "d", NodeKind::Directory).unwrap();
        tree.create("/alice/d", "sub", NodeKind::Directory).unwrap();
        tree.create("/alice/d/sub", "f", NodeKind::File).unwrap();
        tree.set_content("/alice/d/sub", "f", "12345").unwrap();
        tree.create("/alice", "dx", NodeKind::Directory).unwrap();
        tree.create("/alice/dx", "g", NodeKind::File).unwrap();
        tree
    }

    #[test]
    fn test_rename_directory_moves_descendant_paths() {
        let mut tree = sample();
        tree.rename("/alice", "d", "d2").unwrap();

        assert!(tree.lookup_path("/alice/d2/sub/f").is_some());
        assert!(tree.lookup_path("/alice/d/sub/f").is_none());
        assert!(tree.lookup_path("/alice/dx/g").is_some());
        assert_eq!(tree.lookup_path("/alice/d2").unwrap().size, 5);
    }

    #[test]
    fn test_rename_failures_leave_tree_untouched() {
        let mut tree = sample();
        assert_eq!(
            tree.rename("/alice", "d", "d").unwrap_err(),
            FsError::SameName
        );
        assert!(matches!(
            tree.rename("/alice", "d", "dx"),
            Err(FsError::AlreadyExists { .. })
        ));
        assert!(matches!(
            tree.rename("/alice", "nope", "x"),
            Err(FsError::NotFound { .. })
        ));
        assert!(tree.lookup_path("/alice/d").is_some());
        assert!(tree.lookup_path("/alice/dx").is_some());
    }

    #[test]
    fn test_move_adjusts_both_ancestor_chains() {
        let mut tree = sample();
        let location = tree.move_node("/alice/d", "sub", "../dx").unwrap();
        assert_eq!(location, "/alice/dx");

        assert_eq!(tree.lookup_path("/alice/d").unwrap().size, 0);
        assert_eq!(tree.lookup_path("/alice/dx").unwrap().size, 5);
        assert!(tree.lookup_path("/alice/dx/sub/f").is_some());
        assert!(tree.verify_sizes().is_empty());
    }

    #[test]
    fn test_move_rejects_cycles_collisions_and_scope() {
        let mut tree = sample();
        assert!(matches!(
            tree.move_node("/alice", "d", "d/sub"),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            tree.move_node("/alice", "d", "."),
            Err(FsError::AlreadyExists { .. })
        ));
        assert!(matches!(
            tree.move_node("/alice", "d", "/bob"),
            Err(FsError::OutOfScope { .. })
        ));
        assert!(matches!(
            tree.move_node("/alice", "d", "missing"),
            Err(FsError::NotFound { .. })
        ));
        assert!(tree.lookup_path("/alice/d/sub/f").is_some());
    }
}
