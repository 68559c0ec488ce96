//! User record store
//!
//! The persisted shape of a user's file system is three flat collections of
//! records addressed by `(location, name)`. The store loads and saves whole
//! records; it never sees partial updates.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::portfolio::Portfolio;
use crate::types::Timestamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    pub name: String,
    pub location: String,
    pub size: u64,
    pub last_modified: Timestamp,
}

/// File record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub name: String,
    pub location: String,
    pub content: String,
    pub size: u64,
    pub last_modified: Timestamp,
}

/// Url bookmark record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub name: String,
    pub location: String,
    pub url: String,
    pub size: u64,
    pub last_modified: Timestamp,
}

/// A user's whole file system as flat collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub directories: Vec<DirectoryRecord>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub urls: Vec<UrlRecord>,
}

impl UserData {
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len() + self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything stored for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub data: UserData,
    #[serde(default)]
    pub portfolio: Portfolio,
}

impl UserRecord {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            username: username.to_string(),
            password_hash,
            created_at: crate::types::now(),
            data: UserData::default(),
            portfolio: Portfolio::for_user(username),
        }
    }
}

/// Persistence port for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load_user(&self, username: &str) -> Result<Option<UserRecord>, StorageError>;
    async fn save_user(&self, record: &UserRecord) -> Result<(), StorageError>;
    /// Returns whether a record was removed
    async fn delete_user(&self, username: &str) -> Result<bool, StorageError>;
    async fn list_usernames(&self) -> Result<Vec<String>, StorageError>;
}

pub use memory::MemoryUserStore;
pub use persistence::SledUserStore;
