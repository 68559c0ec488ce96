//! Mutation and query operations on a [`FileTree`](crate::tree::FileTree)
//!
//! Every operation validates its preconditions before touching the arena, so
//! a failed call leaves the tree exactly as it was.

pub mod create;
pub mod edit;
pub mod navigate;
pub mod relocate;
pub mod remove;

use crate::tree::node::NodeKind;
use crate::types::Timestamp;
use serde::Serialize;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub kind: NodeKind,
    pub name: String,
    pub size: u64,
    pub last_modified: Timestamp,
}

/// Result of opening a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    File { name: String, content: String },
    Url { name: String, url: String },
}

/// Whether `set_url` created a bookmark or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOutcome {
    Created,
    Updated,
}

/// Signed size delta for a node of `size` bytes
pub(crate) fn delta_of(size: u64) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}
