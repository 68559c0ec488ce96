//! Listing and directory navigation

use super::ListingEntry;
use crate::error::FsError;
use crate::tree::node::{KindFilter, NodeKind};
use crate::tree::{path, FileTree};

fn kind_rank(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Directory => 0,
        NodeKind::File => 1,
        NodeKind::Url => 2,
    }
}

impl FileTree {
    /// Immediate children of `location`: directories, then files, then urls,
    /// each group in name order.
    pub fn list_directory(&self, location: &str) -> Result<Vec<ListingEntry>, FsError> {
        let dir = self.require_location(location)?;
        let mut entries: Vec<ListingEntry> = self
            .children(dir)
            .into_iter()
            .map(|n| ListingEntry {
                kind: n.kind(),
                name: n.name.clone(),
                size: n.size,
                last_modified: n.last_modified,
            })
            .collect();
        entries.sort_by(|a, b| {
            kind_rank(a.kind)
                .cmp(&kind_rank(b.kind))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entries)
    }

    /// Location reached by `cd input` from `current`.
    ///
    /// `..`-only paths climb levels but never above home. Anything else is
    /// resolved against `current` (or taken as absolute) and must name an
    /// existing directory inside home.
    pub fn change_directory(&self, current: &str, input: &str) -> Result<String, FsError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FsError::MissingArgument("No directory specified"));
        }
        let home = self.home();
        let current = path::normalize(current);

        if input.starts_with("..") {
            if current == path::ROOT {
                return Err(FsError::InvalidPath("Cannot go back from root".to_string()));
            }
            if current == home {
                return Err(FsError::InvalidPath(
                    "Cannot go back from home directory without signing out".to_string(),
                ));
            }
            let levels = path::segments(input);
            if !levels.iter().all(|s| *s == "..") {
                return Err(FsError::InvalidPath(
                    "Invalid path format. Must only contain '..'".to_string(),
                ));
            }
            let parts = path::segments(&current);
            if levels.len() >= parts.len() {
                return Err(FsError::InvalidPath(
                    "Cannot go back beyond root directory".to_string(),
                ));
            }
            let target = format!("/{}", parts[..parts.len() - levels.len()].join("/"));
            if !path::is_within(&target, &home) {
                return Err(FsError::InvalidPath(
                    "Cannot go back beyond home directory".to_string(),
                ));
            }
            return Ok(target);
        }

        let target = path::resolve(&current, input)?;
        if !path::is_within(&target, &home) {
            return Err(FsError::OutOfScope { path: target });
        }
        self.resolve_location(&target)
            .map(|id| self.full_path(id))
            .ok_or_else(|| FsError::NotFound {
                kind: KindFilter::Directory,
                name: input.to_string(),
            })
    }
}
