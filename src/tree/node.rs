//! Filesystem node types

use crate::types::{NodeId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Concrete node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Url,
}

impl NodeKind {
    pub fn noun(self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
            NodeKind::Url => "url",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Kind requested from a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    Directory,
    File,
    Url,
    Any,
}

impl KindFilter {
    pub fn accepts(self, kind: NodeKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::Any, _)
                | (KindFilter::Directory, NodeKind::Directory)
                | (KindFilter::File, NodeKind::File)
                | (KindFilter::Url, NodeKind::Url)
        )
    }

    pub fn noun(self) -> &'static str {
        match self {
            KindFilter::Directory => "directory",
            KindFilter::File => "file",
            KindFilter::Url => "url",
            KindFilter::Any => "item",
        }
    }
}

impl From<NodeKind> for KindFilter {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Directory => KindFilter::Directory,
            NodeKind::File => KindFilter::File,
            NodeKind::Url => KindFilter::Url,
        }
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// Children indexed by name; names are unique across all kinds
    Directory { children: BTreeMap<String, NodeId> },
    File { content: String },
    Url { url: String },
}

/// A node in a user's tree
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Containing directory; `None` only for the home directory
    pub parent: Option<NodeId>,
    pub size: u64,
    pub last_modified: Timestamp,
    pub content: NodeContent,
}

impl Node {
    pub fn directory(id: NodeId, name: String, parent: Option<NodeId>, at: Timestamp) -> Self {
        Self {
            id,
            name,
            parent,
            size: 0,
            last_modified: at,
            content: NodeContent::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn file(id: NodeId, name: String, parent: NodeId, content: String, at: Timestamp) -> Self {
        Self {
            id,
            name,
            parent: Some(parent),
            size: crate::tree::size::byte_size(&content),
            last_modified: at,
            content: NodeContent::File { content },
        }
    }

    pub fn url(id: NodeId, name: String, parent: NodeId, url: String, at: Timestamp) -> Self {
        Self {
            id,
            name,
            parent: Some(parent),
            size: crate::tree::size::byte_size(&url),
            last_modified: at,
            content: NodeContent::Url { url },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.content {
            NodeContent::Directory { .. } => NodeKind::Directory,
            NodeContent::File { .. } => NodeKind::File,
            NodeContent::Url { .. } => NodeKind::Url,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.content, NodeContent::Directory { .. })
    }

    /// Children index when this node is a directory
    pub fn children(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.content {
            NodeContent::Directory { children } => Some(children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.content {
            NodeContent::Directory { children } => Some(children),
            _ => None,
        }
    }
}
