//! Durable storage and configuration for the Loanwise client.
//!
//! Implements the capability traits defined in `loanwise-core`: the
//! file-backed credential store (with an in-memory variant for tests and
//! headless embeddings), platform path management, and TOML configuration
//! loading.

pub mod config_loader;
pub mod credential_store;
pub mod memory_store;
pub mod paths;

pub use config_loader::{load_config, load_config_from};
pub use credential_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;
pub use paths::LoanwisePaths;
