//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then the global file
//! (`$XDG_CONFIG_HOME/deskfs/config.toml`), then `DESKFS__SECTION__KEY`
//! environment variables.

pub mod facade;
pub mod merge {
    pub mod policy;
    pub mod service;
}
pub mod paths {
    pub mod xdg_root;
}
pub mod sources {
    pub mod environment;
    pub mod global_file;
}

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_WELCOME: &str = "Welcome to the OS Terminal. Type \"help\" for available commands.";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the sled store; None means `$XDG_DATA_HOME/deskfs/store`
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_store_path(&self) -> Result<PathBuf, ApiError> {
        match &self.store_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => paths::xdg_root::default_store_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// First line printed by the interactive terminal
    #[serde(default = "default_welcome")]
    pub welcome: String,
}

fn default_welcome() -> String {
    DEFAULT_WELCOME.to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            welcome: default_welcome(),
        }
    }
}
