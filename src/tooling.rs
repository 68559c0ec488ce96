//! Tooling & Integration Layer
//!
//! Front ends over the shell: the clap CLI and the interactive terminal.

pub mod cli;
pub mod terminal;

pub use cli::{Cli, CliContext, Commands};
pub use terminal::Terminal;
