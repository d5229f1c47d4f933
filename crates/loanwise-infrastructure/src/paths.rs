//! Unified path management for Loanwise client files.
//!
//! All durable client state lives under one platform config directory so
//! storage implementations agree on locations.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/loanwise/          # Linux (platform-appropriate elsewhere)
//! ├── config.toml              # Client configuration
//! └── credentials.json         # Session token + cached user profile
//! ```

use std::path::PathBuf;

use loanwise_core::{LoanwiseError, Result};

/// File name of the durable credential document.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// File name of the client configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// Unified path management for the Loanwise client.
pub struct LoanwisePaths;

impl LoanwisePaths {
    /// Returns the Loanwise configuration directory for the platform.
    ///
    /// # Errors
    ///
    /// `Storage` when the platform config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("loanwise"))
            .ok_or_else(|| LoanwiseError::storage("Cannot find config directory"))
    }

    /// Path of the credential document.
    pub fn credentials_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CREDENTIALS_FILE))
    }

    /// Path of the client configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
