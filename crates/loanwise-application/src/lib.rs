//! Orchestration layer of the Loanwise client.
//!
//! `SessionManager` owns authentication state over the injected credential
//! store and auth gateway; `LoanService` runs the application lifecycle
//! over the loan gateway with a client-side read cache. `LoanwiseApp`
//! wires the production stack.

pub mod bootstrap;
pub mod loan_service;
pub mod session_manager;

pub use bootstrap::LoanwiseApp;
pub use loan_service::LoanService;
pub use session_manager::SessionManager;
