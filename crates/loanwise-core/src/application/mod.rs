//! Loan application lifecycle: server-owned models and the network seam.

pub mod gateway;
pub mod model;

pub use gateway::{ApprovalOutcome, LoanGateway};
pub use model::{ApplicationStatus, LoanApplication, ValidationResult};
