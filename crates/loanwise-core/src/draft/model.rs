//! Loan application draft domain model.
//!
//! A draft accumulates form field values and attached documents for a
//! not-yet-submitted loan application. It is client-local and never
//! persisted across sessions: created empty when the application form is
//! opened, mutated field-by-field, and consumed on a successful submit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

use crate::config::ValidationPolicy;
use crate::error::{FieldError, LoanwiseError, Result};

use super::validate::validate_draft;

/// Form fields of a loan application draft, in wire naming.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DraftField {
    // Identity
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    // Address
    Street,
    City,
    State,
    PostalCode,
    // Loan terms
    LoanAmount,
    LoanPurpose,
    LoanTermMonths,
    // Employment
    EmploymentStatus,
    Employer,
    JobTitle,
    // Financials
    AnnualIncome,
    MonthlyExpenses,
    CreditScore,
    HasExistingLoans,
}

impl DraftField {
    /// Fields whose values must parse as numbers. Enforced at the storage
    /// boundary by [`LoanApplicationDraft::set_field`].
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::LoanAmount
                | Self::LoanTermMonths
                | Self::AnnualIncome
                | Self::MonthlyExpenses
                | Self::CreditScore
        )
    }

    /// Human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::DateOfBirth => "Date of birth",
            Self::Street => "Street address",
            Self::City => "City",
            Self::State => "State",
            Self::PostalCode => "Postal code",
            Self::LoanAmount => "Loan amount",
            Self::LoanPurpose => "Loan purpose",
            Self::LoanTermMonths => "Loan term",
            Self::EmploymentStatus => "Employment status",
            Self::Employer => "Employer",
            Self::JobTitle => "Job title",
            Self::AnnualIncome => "Annual income",
            Self::MonthlyExpenses => "Monthly expenses",
            Self::CreditScore => "Credit score",
            Self::HasExistingLoans => "Existing loans",
        }
    }
}

/// Named required-document attachment points on a draft.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DocumentSlot {
    IdentityDocument,
    TaxIdDocument,
    IncomeProofDocument,
    BankStatementsDocument,
}

impl DocumentSlot {
    /// Slot name as it appears on the wire (multipart part name).
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::IdentityDocument => "identityDocument",
            Self::TaxIdDocument => "taxIdDocument",
            Self::IncomeProofDocument => "incomeProofDocument",
            Self::BankStatementsDocument => "bankStatementsDocument",
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::IdentityDocument => "Identity document",
            Self::TaxIdDocument => "Tax ID document",
            Self::IncomeProofDocument => "Income proof",
            Self::BankStatementsDocument => "Bank statements",
        }
    }

    /// File extensions the backend accepts for this slot.
    ///
    /// Declarative only; `set_document` does not enforce the set, the UI
    /// layer uses it to populate file-picker filters.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Self::IdentityDocument | Self::TaxIdDocument | Self::IncomeProofDocument => {
                &["pdf", "jpg", "jpeg", "png"]
            }
            Self::BankStatementsDocument => &["pdf", "xls", "xlsx"],
        }
    }

    /// Whether a file name carries an extension accepted for this slot.
    pub fn accepts(self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.accepted_extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

/// A binary attachment reference held by a draft.
///
/// The draft stores a reference to the file on disk, not its contents; the
/// bytes are only read when the submission is encoded for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAttachment {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: String,
}

impl DocumentAttachment {
    pub fn new(
        file_name: impl Into<String>,
        path: impl Into<PathBuf>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
            content_type: content_type.into(),
        }
    }

    /// Builds an attachment from a path, guessing the MIME type from the
    /// file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment")
            .to_string();
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            path,
            content_type,
        }
    }
}

/// An in-progress, not-yet-submitted loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationDraft {
    /// Client-local draft identifier, never sent to the backend.
    id: String,
    fields: BTreeMap<DraftField, String>,
    documents: BTreeMap<DocumentSlot, DocumentAttachment>,
}

impl Default for LoanApplicationDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanApplicationDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fields: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stores a field value.
    ///
    /// No validation is performed at write time (deferred to
    /// [`LoanApplicationDraft::validate`]), except that numeric fields
    /// reject non-numeric input at the storage boundary. Setting an empty
    /// value clears the field.
    ///
    /// # Errors
    ///
    /// `Validation` with a single field error when a numeric field is given
    /// non-numeric input.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            self.fields.remove(&field);
            return Ok(());
        }

        if field.is_numeric() && trimmed.parse::<f64>().is_err() {
            return Err(LoanwiseError::Validation(vec![FieldError::new(
                field.to_string(),
                format!("{} must be a number", field.label()),
            )]));
        }

        self.fields.insert(field, trimmed.to_string());
        Ok(())
    }

    /// Returns the stored value for a field, if any.
    pub fn field(&self, field: DraftField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Attaches a document to a slot, replacing any previous attachment.
    pub fn set_document(&mut self, slot: DocumentSlot, attachment: DocumentAttachment) {
        self.documents.insert(slot, attachment);
    }

    /// Detaches the document from a slot, if any.
    pub fn remove_document(&mut self, slot: DocumentSlot) {
        self.documents.remove(&slot);
    }

    /// Returns the attachment in a slot, if any.
    pub fn document(&self, slot: DocumentSlot) -> Option<&DocumentAttachment> {
        self.documents.get(&slot)
    }

    /// Runs full draft validation against `policy` as of today.
    ///
    /// Returns one error per offending field or document slot; an empty
    /// vector means the draft is submittable. Never touches the network.
    pub fn validate(&self, policy: &ValidationPolicy) -> Vec<FieldError> {
        self.validate_at(policy, chrono::Utc::now().date_naive())
    }

    /// Like [`LoanApplicationDraft::validate`], with an explicit reference
    /// date for the age rule.
    pub fn validate_at(&self, policy: &ValidationPolicy, today: NaiveDate) -> Vec<FieldError> {
        validate_draft(self, policy, today)
    }

    /// Consumes the draft's current values into an immutable submission
    /// payload for the lifecycle client.
    ///
    /// # Errors
    ///
    /// `DraftNotReady` carrying the outstanding field errors whenever
    /// [`LoanApplicationDraft::validate`] is non-empty.
    pub fn to_submission(&self, policy: &ValidationPolicy) -> Result<LoanSubmission> {
        let errors = self.validate(policy);
        if !errors.is_empty() {
            return Err(LoanwiseError::DraftNotReady(errors));
        }

        let fields = self
            .fields
            .iter()
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect();
        let documents = self
            .documents
            .iter()
            .map(|(slot, attachment)| SubmissionDocument {
                slot: *slot,
                attachment: attachment.clone(),
            })
            .collect();

        Ok(LoanSubmission { fields, documents })
    }

    pub(crate) fn fields(&self) -> &BTreeMap<DraftField, String> {
        &self.fields
    }

    pub(crate) fn documents(&self) -> &BTreeMap<DocumentSlot, DocumentAttachment> {
        &self.documents
    }
}

/// A document paired with the slot it fills, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionDocument {
    pub slot: DocumentSlot,
    pub attachment: DocumentAttachment,
}

/// Immutable submission payload produced by a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSubmission {
    fields: BTreeMap<String, String>,
    documents: Vec<SubmissionDocument>,
}

impl LoanSubmission {
    /// Form field values keyed by wire name.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Documents to upload, each tagged with its slot.
    pub fn documents(&self) -> &[SubmissionDocument] {
        &self.documents
    }
}
