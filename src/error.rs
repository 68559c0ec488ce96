//! Error types for file system operations, storage and the command surface.

use crate::tree::node::KindFilter;
use thiserror::Error;

/// Expected outcomes of file system and session operations.
///
/// These are ordinary results, not faults: the dispatcher renders each one as
/// an `Error: ...` line and the session keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{} not found: {name}", capitalize(.kind.noun()))]
    NotFound { kind: KindFilter, name: String },

    #[error("{} {} with the name '{name}' already exists in this location", article(.kind.noun()), .kind.noun())]
    AlreadyExists { kind: KindFilter, name: String },

    #[error("Directory is not empty")]
    NotEmpty { name: String },

    #[error("{0}")]
    InvalidPath(String),

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Please sign in to {action}")]
    Unauthenticated { action: &'static str },

    #[error("Cannot operate outside of user's directory")]
    OutOfScope { path: String },

    #[error("The new name must be different from the current name")]
    SameName,

    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("{0}")]
    Rejected(String),

    #[error("You are already signed in!")]
    AlreadySignedIn,

    #[error("You are not signed in!")]
    NotSignedIn,

    #[error("Command not found: {0}")]
    UnknownCommand(String),

    #[error("Unknown portfolio command: {0}")]
    UnknownPortfolioCommand(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o') => "An",
        _ => "A",
    }
}

fn capitalize(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted user record for {username}: {reason}")]
    Corrupted { username: String, reason: String },

    #[error("Storage unavailable")]
    Unavailable,
}

/// API errors: expected outcomes plus the faults that may propagate
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message() {
        let err = FsError::AlreadyExists {
            kind: KindFilter::File,
            name: "a.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A file with the name 'a.txt' already exists in this location"
        );

        let err = FsError::AlreadyExists {
            kind: KindFilter::Any,
            name: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "An item with the name 'x' already exists in this location"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = FsError::NotFound {
            kind: KindFilter::Directory,
            name: "docs".to_string(),
        };
        assert_eq!(err.to_string(), "Directory not found: docs");
    }

    #[test]
    fn test_fs_error_is_transparent_in_api_error() {
        let err: ApiError = FsError::SameName.into();
        assert_eq!(
            err.to_string(),
            "The new name must be different from the current name"
        );
    }
}
