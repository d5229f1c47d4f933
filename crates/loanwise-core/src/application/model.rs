//! Loan application domain model.
//!
//! `LoanApplication` and `ValidationResult` are owned by the backend; the
//! client holds them only as a read cache with no write-back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side status of a submitted application.
///
/// Transitions only `Pending -> {Approved, Rejected}`; once terminal, no
/// further approval requests are issued by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Whether the status is final from the client's perspective.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A submitted loan application as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub loan_amount: f64,
    pub loan_purpose: String,
    pub loan_term_months: u32,
    pub employment_status: String,
    pub annual_income: f64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// The backend's approve/reject decision for an application.
///
/// At most one exists per application; absence means the decision has not
/// been requested yet. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub application_id: String,
    pub approved: bool,
    pub message: String,
    pub validation_date: DateTime<Utc>,
}
