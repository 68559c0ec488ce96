//! Identity collaborator
//!
//! The dispatcher only needs "who is this" answers. [`StoreAuthenticator`] is
//! a local stand-in that keeps a salted blake3 digest in the user record.

use crate::error::{ApiError, FsError};
use crate::service::DeskService;
use crate::store::UserRecord;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const MIN_USERNAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account; the caller signs the new user in.
    async fn sign_up(&self, username: &str, password: &str) -> Result<(), ApiError>;

    /// Check credentials of an existing account.
    async fn sign_in(&self, username: &str, password: &str) -> Result<(), ApiError>;

    /// Delete an account after checking its password.
    async fn delete_account(&self, username: &str, password: &str) -> Result<(), ApiError>;
}

/// Username rules: at least two characters, ASCII letters and digits only
pub fn validate_username(username: &str) -> Result<(), FsError> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(FsError::Rejected(
            "Username must be at least 2 characters long.".to_string(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FsError::Rejected(
            "Username must only contain letters and numbers.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FsError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FsError::Rejected(
            "Password must be at least 8 characters long.".to_string(),
        ));
    }
    Ok(())
}

static SALT_COUNTER: AtomicU64 = AtomicU64::new(0);

fn new_salt(username: &str) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(username.as_bytes());
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&SALT_COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// `salt_hex$digest_hex`
pub fn hash_password(username: &str, password: &str) -> String {
    let salt = new_salt(username);
    let digest = blake3::keyed_hash(&salt, password.as_bytes());
    format!("{}${}", hex::encode(salt), digest.to_hex())
}

/// Compare against a stored `salt_hex$digest_hex`; malformed hashes never match.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(salt) = <[u8; 32]>::try_from(salt.as_slice()) else {
        return false;
    };
    let Ok(expected) = blake3::Hash::from_hex(digest_hex) else {
        return false;
    };
    blake3::keyed_hash(&salt, password.as_bytes()) == expected
}

/// Authenticator backed by the user store
pub struct StoreAuthenticator {
    service: Arc<DeskService>,
}

impl StoreAuthenticator {
    pub fn new(service: Arc<DeskService>) -> Self {
        Self { service }
    }

    async fn check(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let record = match self.service.load_record(username).await {
            Ok(record) => record,
            Err(ApiError::Fs(FsError::UserNotFound(_))) => {
                return Err(FsError::AuthFailed("user not found".to_string()).into())
            }
            Err(e) => return Err(e),
        };
        if !verify_password(&record.password_hash, password) {
            tracing::warn!(username, "rejected sign in");
            return Err(FsError::AuthFailed("invalid password".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for StoreAuthenticator {
    async fn sign_up(&self, username: &str, password: &str) -> Result<(), ApiError> {
        validate_username(username)?;
        validate_password(password)?;
        let record = UserRecord::new(username, hash_password(username, password));
        self.service.create_user(record).await
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.check(username, password).await
    }

    async fn delete_account(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.check(username, password).await?;
        self.service.delete_user(username).await
    }
}
