//! Wire-format request/response bodies and status-to-error mapping.
//!
//! The mapping helpers are pure functions over a status code and response
//! body so the error taxonomy can be unit tested without a server.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use loanwise_core::LoanwiseError;
use loanwise_core::application::{LoanApplication, ValidationResult};
use loanwise_core::session::User;

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /auth/login` and `POST /auth/register` response.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `POST /loan/{id}/request-approval` response: the updated application and
/// its decision record, delivered together.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApprovalResponse {
    pub application: LoanApplication,
    pub validation_log: ValidationResult,
}

/// Structured error body the backend attaches to 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts the structured backend message from an error body, if any.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.message)
}

/// Maps a failed auth response to the error taxonomy.
///
/// A structured 4xx becomes `InvalidCredentials` with the backend message
/// surfaced verbatim; everything else is a generic `Network` failure.
pub(crate) fn auth_error(status: StatusCode, body: &str, fallback: &str) -> LoanwiseError {
    if status.is_client_error() {
        let message = error_message(body).unwrap_or_else(|| fallback.to_string());
        LoanwiseError::invalid_credentials(message)
    } else {
        LoanwiseError::network(format!("{fallback} ({status})"))
    }
}

/// Maps a failed submission response to the error taxonomy.
pub(crate) fn submit_error(status: StatusCode, body: &str) -> LoanwiseError {
    if status.is_client_error() {
        if let Some(message) = error_message(body) {
            return LoanwiseError::submission_rejected(message);
        }
    }
    LoanwiseError::network(format!("Failed to submit application ({status})"))
}

/// Maps a failed lifecycle read/approval response to the error taxonomy.
///
/// The backend answers 404 for an absent application and 403 for one owned
/// by someone else; both are `NotFound` from the caller's perspective.
pub(crate) fn loan_error(status: StatusCode, body: &str, id: &str) -> LoanwiseError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
            LoanwiseError::not_found("LoanApplication", id)
        }
        StatusCode::UNAUTHORIZED => {
            let message = error_message(body).unwrap_or_else(|| "Session expired".to_string());
            LoanwiseError::invalid_credentials(message)
        }
        StatusCode::CONFLICT => LoanwiseError::AlreadyDecided { id: id.to_string() },
        _ => LoanwiseError::network(format!("Loan request failed ({status})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanwise_core::application::ApplicationStatus;

    #[test]
    fn approval_response_decodes_backend_field_names() {
        let json = r#"{
            "application": {
                "id": "app-1",
                "userId": "u-1",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "loanAmount": 5000.0,
                "loanPurpose": "education",
                "loanTermMonths": 36,
                "employmentStatus": "Employed",
                "annualIncome": 40000.0,
                "status": "APPROVED",
                "createdAt": "2025-05-01T12:00:00Z"
            },
            "validationLog": {
                "applicationId": "app-1",
                "approved": true,
                "message": "Income verified",
                "validationDate": "2025-05-02T08:30:00Z"
            }
        }"#;
        let response: ApprovalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.application.status, ApplicationStatus::Approved);
        assert!(response.validation_log.approved);
        assert_eq!(response.validation_log.application_id, "app-1");
    }

    #[test]
    fn structured_message_is_surfaced_verbatim() {
        let err = auth_error(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Email or password incorrect"}"#,
            "Login failed",
        );
        assert!(
            matches!(err, LoanwiseError::InvalidCredentials { message } if message == "Email or password incorrect")
        );
    }

    #[test]
    fn unstructured_4xx_falls_back_to_generic_message() {
        let err = auth_error(StatusCode::BAD_REQUEST, "oops", "Login failed");
        assert!(matches!(err, LoanwiseError::InvalidCredentials { message } if message == "Login failed"));
    }

    #[test]
    fn server_errors_are_network_errors() {
        let err = auth_error(StatusCode::BAD_GATEWAY, "", "Login failed");
        assert!(err.is_network());
    }

    #[test]
    fn submit_maps_structured_4xx_to_rejection() {
        let err = submit_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "Bank statements unreadable"}"#,
        );
        assert!(
            matches!(err, LoanwiseError::SubmissionRejected { message } if message == "Bank statements unreadable")
        );

        let err = submit_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(err.is_network());
    }

    #[test]
    fn absent_and_foreign_applications_are_not_found() {
        assert!(loan_error(StatusCode::NOT_FOUND, "", "app-1").is_not_found());
        assert!(loan_error(StatusCode::FORBIDDEN, "", "app-1").is_not_found());
    }

    #[test]
    fn conflict_means_already_decided() {
        let err = loan_error(StatusCode::CONFLICT, "", "app-1");
        assert!(matches!(err, LoanwiseError::AlreadyDecided { id } if id == "app-1"));
    }
}
