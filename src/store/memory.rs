//! In-memory user store
//!
//! Used by tests and by `exec` runs without a store path. The `unavailable`
//! switch makes every call fail with [`StorageError::Unavailable`].

use super::{UserRecord, UserStore};
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn load_user(&self, username: &str) -> Result<Option<UserRecord>, StorageError> {
        self.check()?;
        Ok(self.users.read().get(username).cloned())
    }

    async fn save_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        self.check()?;
        self.users
            .write()
            .insert(record.username.clone(), record.clone());
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<bool, StorageError> {
        self.check()?;
        Ok(self.users.write().remove(username).is_some())
    }

    async fn list_usernames(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        let mut names: Vec<String> = self.users.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
