//! Domain core of the Loanwise client.
//!
//! Holds the authentication session state machine, the route guard, the
//! application draft builder with its validation rules, the server-owned
//! application models, and the capability traits (`CredentialStore`,
//! `AuthGateway`, `LoanGateway`) implemented by the infrastructure and API
//! crates. This crate performs no I/O.

pub mod application;
pub mod config;
pub mod draft;
pub mod error;
pub mod presenter;
pub mod routing;
pub mod session;

// Re-export common error type
pub use error::{FieldError, LoanwiseError, Result};
