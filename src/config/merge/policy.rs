//! Built-in defaults, the lowest layer of every merge.

use crate::config::DEFAULT_WELCOME;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = Config::builder()
        .set_default("shell.welcome", DEFAULT_WELCOME)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "file")?;
    Ok(builder)
}
