//! HTTP implementation of the Loanwise gateways.
//!
//! `ApiClient` speaks the backend REST surface and implements the
//! `AuthGateway` and `LoanGateway` traits from `loanwise-core`.

pub mod client;
mod wire;

pub use client::ApiClient;
