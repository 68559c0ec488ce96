//! Path handling for `location` strings
//!
//! A location is an absolute, `/`-separated path naming a directory. A node's
//! own full path is its location joined with its name.

use crate::error::FsError;
use unicode_normalization::UnicodeNormalization;

pub const SEPARATOR: char = '/';
pub const ROOT: &str = "/";

/// Home directory of a user
pub fn home_of(username: &str) -> String {
    format!("/{}", username)
}

/// Collapse repeated separators and drop a trailing one (except for root).
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split(SEPARATOR).filter(|s| !s.is_empty()).collect();
    let body = segments.join("/");
    if path.starts_with(SEPARATOR) || body.is_empty() {
        format!("/{}", body)
    } else {
        body
    }
}

/// `parent + "/" + child`, normalized
pub fn join(parent: &str, child: &str) -> String {
    normalize(&format!("{}/{}", parent, child))
}

/// Non-empty segments of a path
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Split a full path into `(parent location, leaf name)`.
///
/// Returns `None` for the root, which has no parent.
pub fn split_last(path: &str) -> Option<(String, String)> {
    let mut parts = segments(path);
    let name = parts.pop()?.to_string();
    Some((format!("/{}", parts.join("/")), name))
}

/// Whether `path` is `ancestor` itself or lies below it.
///
/// The comparison is segment-wise, so `/a/bc` is not below `/a/b`.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    let path = segments(path);
    let ancestor = segments(ancestor);
    path.len() >= ancestor.len() && path[..ancestor.len()] == ancestor[..]
}

/// Resolve `input` against `base` lexically, handling `.` and `..`.
///
/// Absolute inputs ignore `base`. Climbing above `/` is an `InvalidPath`.
pub fn resolve(base: &str, input: &str) -> Result<String, FsError> {
    let mut stack: Vec<&str> = if input.starts_with(SEPARATOR) {
        Vec::new()
    } else {
        segments(base)
    };
    for segment in segments(input) {
        match segment {
            "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(FsError::InvalidPath(
                        "Cannot go back beyond root directory".to_string(),
                    ));
                }
            }
            other => stack.push(other),
        }
    }
    Ok(format!("/{}", stack.join("/")))
}

/// Validate and NFC-normalize a node name.
pub fn validate_name(name: &str) -> Result<String, FsError> {
    let name: String = name.nfc().collect();
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(SEPARATOR)
        || name.contains('\0')
    {
        return Err(FsError::InvalidName(name));
    }
    Ok(name)
}
