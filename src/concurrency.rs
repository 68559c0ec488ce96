//! Per-user serialization of read-modify-write cycles
//!
//! Every mutating command loads a whole user record, changes it in memory and
//! saves it back. Two sessions of the same user inside one process take the
//! user's lock for the whole cycle; different users never contend.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-user async lock manager
pub struct UserLockManager {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Lock handle for `username`, created on first use
    pub fn get_lock(&self, username: &str) -> Arc<Mutex<()>> {
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(username) {
                return lock.clone();
            }
        }

        // Double-check after acquiring the write lock
        let mut map = self.locks.write();
        map.entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry of a deleted user
    pub fn forget(&self, username: &str) {
        self.locks.write().remove(username);
    }
}

impl Default for UserLockManager {
    fn default() -> Self {
        Self::new()
    }
}
