//! CLI Tooling
//!
//! Command-line front end for the desk file system: an interactive shell,
//! one-shot line execution, and maintenance commands over a user's tree.

use crate::config::{ConfigLoader, DeskConfig};
use crate::error::{ApiError, FsError};
use crate::identity::StoreAuthenticator;
use crate::logging::LoggingConfig;
use crate::service::DeskService;
use crate::session::Session;
use crate::shell::{format, Shell};
use crate::store::{SledUserStore, UserStore};
use crate::tree::size::SizeMismatch;
use crate::tooling::terminal::Terminal;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Deskfs CLI - per-user simulated file system
#[derive(Parser)]
#[command(name = "deskfs")]
#[command(about = "Per-user simulated file system with a terminal command dispatcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold log flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if self.log_file.is_some() {
            config.file = self.log_file.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive terminal
    Shell {
        /// Start signed in as this user
        #[arg(long)]
        user: Option<String>,
    },
    /// Run each line in one session and print every output line
    Exec {
        /// Run signed in as this user
        #[arg(long)]
        user: Option<String>,
        /// Command lines, e.g. "mkdir docs"
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Check that every directory size equals the sum of its children
    Validate {
        user: String,
        /// Recompute sizes and save
        #[arg(long)]
        repair: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a user's hierarchy with sizes
    Tree {
        user: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context owning the runtime, store and dispatcher
pub struct CliContext {
    config: DeskConfig,
    runtime: Runtime,
    service: Arc<DeskService>,
    shell: Shell,
}

impl CliContext {
    /// Load config and open the store at the configured (or overridden) path.
    pub fn new(config_path: Option<PathBuf>, store_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let mut config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load()?
        };
        if store_path.is_some() {
            config.storage.store_path = store_path;
        }

        let store_path = config.storage.resolve_store_path()?;
        let store: Arc<dyn UserStore> = Arc::new(SledUserStore::open(&store_path)?);
        Self::with_store(config, store)
    }

    /// Build a context over an existing store
    pub fn with_store(config: DeskConfig, store: Arc<dyn UserStore>) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start runtime: {}", e)))?;
        let service = Arc::new(DeskService::new(store));
        let auth = Arc::new(StoreAuthenticator::new(Arc::clone(&service)));
        let shell = Shell::new(Arc::clone(&service), auth);
        Ok(Self {
            config,
            runtime,
            service,
            shell,
        })
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        tracing::debug!(command = command_name(command), "cli command");
        match command {
            Commands::Shell { user } => {
                let mut session = self.session_for(user.as_deref())?;
                let terminal = Terminal::new(&self.shell, &self.runtime, &self.config.shell.welcome);
                terminal.run(&mut session)?;
                Ok(String::new())
            }
            Commands::Exec { user, lines } => {
                let mut session = self.session_for(user.as_deref())?;
                let mut out = Vec::new();
                for line in lines {
                    out.extend(self.runtime.block_on(self.shell.execute(&mut session, line)));
                }
                Ok(out.join("\n"))
            }
            Commands::Validate {
                user,
                repair,
                format,
            } => self.handle_validate(user, *repair, format),
            Commands::Tree { user, format } => self.handle_tree(user, format),
        }
    }

    /// `--user` names an already-resolved identity; it must exist.
    fn session_for(&self, user: Option<&str>) -> Result<Session, ApiError> {
        match user {
            Some(name) => {
                let name = name.to_lowercase();
                if !self.runtime.block_on(self.service.user_exists(&name))? {
                    return Err(FsError::UserNotFound(name).into());
                }
                Ok(Session::signed_in(&name))
            }
            None => Ok(Session::new()),
        }
    }

    fn handle_validate(&self, user: &str, repair: bool, format: &str) -> Result<String, ApiError> {
        let mismatches = self.runtime.block_on(self.service.validate(user))?;
        let repaired = if repair && !mismatches.is_empty() {
            Some(self.runtime.block_on(self.service.repair(user))?)
        } else {
            None
        };

        match format {
            "json" => {
                let output = json!({
                    "user": user,
                    "valid": mismatches.is_empty(),
                    "mismatches": mismatches,
                    "repaired": repaired,
                });
                Ok(serde_json::to_string_pretty(&output).map_err(crate::error::StorageError::from)?)
            }
            _ => Ok(format_validate_text(user, &mismatches, repaired)),
        }
    }

    fn handle_tree(&self, user: &str, format: &str) -> Result<String, ApiError> {
        match format {
            "json" => {
                let record = self.runtime.block_on(self.service.load_record(user))?;
                Ok(serde_json::to_string_pretty(&record.data).map_err(crate::error::StorageError::from)?)
            }
            _ => {
                let tree = self.runtime.block_on(self.service.tree(user))?;
                Ok(format::tree_lines(&tree).join("\n"))
            }
        }
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn format_validate_text(user: &str, mismatches: &[SizeMismatch], repaired: Option<usize>) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Size Validation"));
    if mismatches.is_empty() {
        out.push_str(&format!("  User: {}\n  All directory sizes match their contents\n", user));
        return out;
    }

    out.push_str(&format!("  User: {}\n  Mismatches: {}\n\n", user, mismatches.len()));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Directory", "Recorded", "Expected"]);
    for m in mismatches {
        table.add_row(vec![
            m.path.clone(),
            m.recorded.to_string(),
            m.expected.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    if let Some(changed) = repaired {
        out.push_str(&format!("\nRepaired {} director{}\n", changed, if changed == 1 { "y" } else { "ies" }));
    }
    out
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Shell { .. } => "shell",
        Commands::Exec { .. } => "exec",
        Commands::Validate { .. } => "validate",
        Commands::Tree { .. } => "tree",
    }
}
