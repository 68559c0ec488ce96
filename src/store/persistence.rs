//! Sled-backed user store
//!
//! One sled tree named `users`; keys are usernames, values the JSON encoding
//! of a [`UserRecord`].

use super::{UserRecord, UserStore};
use crate::error::StorageError;
use async_trait::async_trait;
use std::path::Path;

const USERS_TREE: &str = "users";

/// Sled-backed implementation of [`UserStore`]
pub struct SledUserStore {
    users: sled::Tree,
}

impl SledUserStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Use an already opened database.
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let users = db.open_tree(USERS_TREE)?;
        Ok(Self { users })
    }

    fn decode(username: &str, bytes: &[u8]) -> Result<UserRecord, StorageError> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::warn!(username, error = %e, "rejecting undecodable user record");
            StorageError::Corrupted {
                username: username.to_string(),
                reason: e.to_string(),
            }
        })
    }

    async fn flush(&self) -> Result<(), StorageError> {
        self.users.flush_async().await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SledUserStore {
    async fn load_user(&self, username: &str) -> Result<Option<UserRecord>, StorageError> {
        match self.users.get(username.as_bytes())? {
            Some(bytes) => Self::decode(username, &bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn save_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(record)?;
        self.users.insert(record.username.as_bytes(), bytes)?;
        self.flush().await
    }

    async fn delete_user(&self, username: &str) -> Result<bool, StorageError> {
        let removed = self.users.remove(username.as_bytes())?.is_some();
        self.flush().await?;
        Ok(removed)
    }

    async fn list_usernames(&self) -> Result<Vec<String>, StorageError> {
        self.users
            .iter()
            .keys()
            .map(|key| -> Result<String, StorageError> {
                let key = key?;
                Ok(String::from_utf8_lossy(&key).into_owned())
            })
            .collect()
    }
}
