//! Core types for the deskfs simulated file system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: arena key of a node within one user's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Timestamp: modification time of a node
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current wall-clock time as a node timestamp
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
