//! Client configuration models.
//!
//! Plain serde structs; loading from disk lives in
//! `loanwise-infrastructure`.

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend endpoint configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the backend REST surface, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Tunable draft validation thresholds.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ValidationPolicy {
    /// Smallest loan amount accepted by the draft validator. `None` means
    /// any positive amount passes.
    #[serde(default)]
    pub minimum_loan_amount: Option<f64>,
}

/// Root client configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub validation: ValidationPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.validation.minimum_loan_amount.is_none());
    }

    #[test]
    fn partial_config_parses() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://loans.example.com/api"

            [validation]
            minimum_loan_amount = 1000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://loans.example.com/api");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.validation.minimum_loan_amount, Some(1000.0));
    }
}
