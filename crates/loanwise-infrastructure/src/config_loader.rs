//! Client configuration loading.

use std::fs;
use std::path::Path;

use loanwise_core::Result;
use loanwise_core::config::ClientConfig;

use crate::paths::LoanwisePaths;

/// Loads the client configuration from the default config file path
/// (`~/.config/loanwise/config.toml` on Linux).
///
/// A missing or empty file yields the default configuration; a file that
/// exists but cannot be read or parsed is an error.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(&LoanwisePaths::config_file()?)
}

/// Loads the client configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ClientConfig::default());
    }

    let config = toml::from_str(&content)?;
    Ok(config)
}
