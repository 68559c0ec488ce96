//! DeskService: stage-then-commit access to user records
//!
//! Every operation loads the user's whole record, rebuilds the tree, runs the
//! operation in memory and, for mutations, writes the record back once. A
//! failed operation never reaches the store, so the stored record is either
//! fully updated or untouched.

use crate::concurrency::UserLockManager;
use crate::error::{ApiError, FsError};
use crate::ops::{ListingEntry, Opened, UrlOutcome};
use crate::portfolio::Portfolio;
use crate::store::{UserRecord, UserStore};
use crate::tree::node::NodeKind;
use crate::tree::size::SizeMismatch;
use crate::tree::FileTree;
use std::sync::Arc;

pub struct DeskService {
    store: Arc<dyn UserStore>,
    locks: UserLockManager,
}

impl DeskService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            locks: UserLockManager::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Stored record of `username`, or `UserNotFound`
    pub async fn load_record(&self, username: &str) -> Result<UserRecord, ApiError> {
        self.store
            .load_user(username)
            .await?
            .ok_or_else(|| FsError::UserNotFound(username.to_string()).into())
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.store.load_user(username).await?.is_some())
    }

    /// Store a brand new record; fails if the name is taken.
    pub async fn create_user(&self, record: UserRecord) -> Result<(), ApiError> {
        let lock = self.locks.get_lock(&record.username);
        let _guard = lock.lock().await;
        if self.store.load_user(&record.username).await?.is_some() {
            return Err(FsError::Rejected("Username already exists".to_string()).into());
        }
        self.store.save_user(&record).await?;
        tracing::info!(username = %record.username, "user created");
        Ok(())
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        {
            let lock = self.locks.get_lock(username);
            let _guard = lock.lock().await;
            if !self.store.delete_user(username).await? {
                return Err(FsError::UserNotFound(username.to_string()).into());
            }
        }
        self.locks.forget(username);
        tracing::info!(username, "user deleted");
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.store.list_usernames().await?)
    }

    /// Run a read-only operation against the user's current tree.
    pub async fn read<T, F>(&self, username: &str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&FileTree) -> Result<T, FsError>,
    {
        let record = self.load_record(username).await?;
        let tree = FileTree::from_records(username, &record.data)?;
        Ok(f(&tree)?)
    }

    /// Run a mutation in memory and commit the result with one write.
    pub async fn mutate<T, F>(&self, username: &str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut FileTree) -> Result<T, FsError>,
    {
        let lock = self.locks.get_lock(username);
        let _guard = lock.lock().await;

        let mut record = self.load_record(username).await?;
        let mut tree = FileTree::from_records(username, &record.data)?;
        let out = f(&mut tree)?;
        record.data = tree.to_records();
        self.store.save_user(&record).await?;
        Ok(out)
    }

    pub async fn tree(&self, username: &str) -> Result<FileTree, ApiError> {
        self.read(username, |tree| Ok(tree.clone())).await
    }

    pub async fn list_directory(&self, username: &str, location: &str) -> Result<Vec<ListingEntry>, ApiError> {
        self.read(username, |tree| tree.list_directory(location)).await
    }

    pub async fn change_directory(&self, username: &str, current: &str, input: &str) -> Result<String, ApiError> {
        self.read(username, |tree| tree.change_directory(current, input))
            .await
    }

    pub async fn open(&self, username: &str, location: &str, name: &str) -> Result<Opened, ApiError> {
        self.read(username, |tree| tree.open(location, name)).await
    }

    pub async fn create(&self, username: &str, location: &str, name: &str, kind: NodeKind) -> Result<(), ApiError> {
        self.mutate(username, |tree| tree.create(location, name, kind).map(|_| ()))
            .await
    }

    pub async fn set_content(&self, username: &str, location: &str, name: &str, content: &str) -> Result<(), ApiError> {
        self.mutate(username, |tree| tree.set_content(location, name, content))
            .await
    }

    pub async fn set_url(&self, username: &str, location: &str, name: &str, url: &str) -> Result<UrlOutcome, ApiError> {
        self.mutate(username, |tree| tree.set_url(location, name, url))
            .await
    }

    pub async fn rename(&self, username: &str, location: &str, old_name: &str, new_name: &str) -> Result<(), ApiError> {
        self.mutate(username, |tree| tree.rename(location, old_name, new_name))
            .await
    }

    pub async fn move_node(&self, username: &str, location: &str, name: &str, destination: &str) -> Result<String, ApiError> {
        self.mutate(username, |tree| tree.move_node(location, name, destination))
            .await
    }

    pub async fn remove(&self, username: &str, location: &str, name: &str, kind: NodeKind) -> Result<NodeKind, ApiError> {
        self.mutate(username, |tree| tree.remove(location, name, kind))
            .await
    }

    /// Directories whose recorded size disagrees with their children
    pub async fn validate(&self, username: &str) -> Result<Vec<SizeMismatch>, ApiError> {
        self.read(username, |tree| Ok(tree.verify_sizes())).await
    }

    /// Recompute every directory size and save; returns how many changed.
    pub async fn repair(&self, username: &str) -> Result<usize, ApiError> {
        let changed = self
            .mutate(username, |tree| Ok(tree.recompute_sizes()))
            .await?;
        if changed > 0 {
            tracing::warn!(username, changed, "repaired directory sizes");
        }
        Ok(changed)
    }

    pub async fn portfolio(&self, username: &str) -> Result<Portfolio, ApiError> {
        Ok(self.load_record(username).await?.portfolio)
    }

    pub async fn save_portfolio(&self, username: &str, portfolio: &Portfolio) -> Result<(), ApiError> {
        let lock = self.locks.get_lock(username);
        let _guard = lock.lock().await;
        let mut record = self.load_record(username).await?;
        record.portfolio = portfolio.clone();
        self.store.save_user(&record).await?;
        Ok(())
    }
}
