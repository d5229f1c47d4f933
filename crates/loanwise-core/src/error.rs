//! Error types for the Loanwise client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used across all Loanwise crates.
pub type Result<T> = std::result::Result<T, LoanwiseError>;

/// A single field-scoped validation error.
///
/// Field errors are produced by local validation only (draft validation,
/// registration form checks) and are meant to be rendered inline beside the
/// offending field. They never originate from the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field or document slot the error is attached to (wire name).
    pub field: String,
    /// Human-readable message for inline display.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A shared error type for the entire Loanwise client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every async operation in the
/// client resolves to either a success value or exactly one of these
/// variants; no operation leaves session or application state partially
/// updated.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LoanwiseError {
    /// Local field-scoped validation failure. No network call was made.
    #[error("Validation failed ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    /// The backend rejected the supplied credentials (structured 4xx).
    /// The message is surfaced verbatim to the user.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// The backend rejected a submission with a structured validation error.
    /// The message is surfaced verbatim to the user.
    #[error("Submission rejected: {message}")]
    SubmissionRejected { message: String },

    /// Backend unreachable, or a response that could not be interpreted.
    /// Surfaced as a generic retryable message.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Referenced entity absent or not owned by the caller.
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An approval request was attempted on an application that already has
    /// a terminal decision.
    #[error("Application '{id}' already has a decision")]
    AlreadyDecided { id: String },

    /// `to_submission` was called on a draft with outstanding field errors.
    #[error("Draft not ready for submission ({} field error(s))", .0.len())]
    DraftNotReady(Vec<FieldError>),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Credential store or other persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LoanwiseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an InvalidCredentials error
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Creates a SubmissionRejected error
    pub fn submission_rejected(message: impl Into<String>) -> Self {
        Self::SubmissionRejected {
            message: message.into(),
        }
    }

    /// Creates an Io error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this error carries field-level errors (local validation or
    /// an unready draft) that should render inline rather than as a banner.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) | Self::DraftNotReady(errors) => Some(errors),
            _ => None,
        }
    }

    /// The user-facing message for banner display.
    ///
    /// Structured backend messages (`InvalidCredentials`,
    /// `SubmissionRejected`) are surfaced verbatim; everything else falls
    /// back to the display form of the variant.
    pub fn banner_message(&self) -> String {
        match self {
            Self::InvalidCredentials { message } | Self::SubmissionRejected { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LoanwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LoanwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LoanwiseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_message_surfaces_backend_messages_verbatim() {
        let err = LoanwiseError::invalid_credentials("Email or password incorrect");
        assert_eq!(err.banner_message(), "Email or password incorrect");

        let err = LoanwiseError::submission_rejected("Missing bank statements");
        assert_eq!(err.banner_message(), "Missing bank statements");
    }

    #[test]
    fn field_errors_only_for_local_validation() {
        let errors = vec![FieldError::new("email", "Email is invalid")];
        assert!(LoanwiseError::Validation(errors.clone())
            .field_errors()
            .is_some());
        assert!(LoanwiseError::DraftNotReady(errors).field_errors().is_some());
        assert!(LoanwiseError::network("down").field_errors().is_none());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LoanwiseError = io.into();
        assert!(matches!(err, LoanwiseError::Io { .. }));
    }
}
