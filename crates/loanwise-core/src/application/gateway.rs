//! Loan lifecycle network seam.

use async_trait::async_trait;

use crate::draft::LoanSubmission;
use crate::error::Result;

use super::model::{LoanApplication, ValidationResult};

/// An application and its decision record, returned together by the
/// approval endpoint. The presenter must never render one without the
/// other, so the gateway keeps them in one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalOutcome {
    pub application: LoanApplication,
    pub validation_result: ValidationResult,
}

/// Network operations for the application lifecycle.
///
/// Implemented over HTTP by `loanwise-api`; mocked in tests. None of these
/// operations is retried automatically.
#[async_trait]
pub trait LoanGateway: Send + Sync {
    /// Sends a completed submission, documents tagged by slot. Returns the
    /// created application with `Pending` status.
    ///
    /// Not idempotent: callers must not retry automatically, and an
    /// in-flight submit is never cancelled.
    ///
    /// # Errors
    ///
    /// `SubmissionRejected` on a structured backend validation error,
    /// `Network` otherwise.
    async fn submit(&self, submission: &LoanSubmission) -> Result<LoanApplication>;

    /// Fetches one application.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such application exists or it does not belong to
    /// the caller.
    async fn fetch_application(&self, id: &str) -> Result<LoanApplication>;

    /// Fetches all applications owned by a user.
    async fn fetch_applications_for_user(&self, user_id: &str) -> Result<Vec<LoanApplication>>;

    /// Fetches the decision record for an application. `Ok(None)` means the
    /// decision has not been requested yet; absence is not an error.
    async fn fetch_validation_result(&self, id: &str) -> Result<Option<ValidationResult>>;

    /// Triggers server-side evaluation and returns the updated application
    /// together with its decision record.
    async fn request_approval(&self, id: &str) -> Result<ApprovalOutcome>;
}
