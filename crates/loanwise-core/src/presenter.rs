//! Decision presenter.
//!
//! Maps a fetched application status and its (possibly absent) decision
//! record into a stable, renderable shape. The mapping is total: every
//! reachable combination yields a defined state.

use crate::application::{ApplicationStatus, ValidationResult};

/// Fallback message when the backend reports a terminal status but the
/// decision record is still in flight.
const GENERIC_APPROVED_MESSAGE: &str = "Your loan application has been approved.";
const GENERIC_REJECTED_MESSAGE: &str = "Your loan application has been rejected.";

/// Renderable decision state for an application's detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionState {
    /// Submitted, no decision requested yet. The UI offers the
    /// request-approval affordance in this state.
    AwaitingDecision,
    Approved { message: String },
    Rejected { message: String },
}

/// Maps `(status, decision record)` to a renderable state.
///
/// When a decision record exists, its verdict wins regardless of the cached
/// status (the record is created by the same server transition that flips
/// the status, so a disagreement means the cached application is stale).
pub fn present(status: ApplicationStatus, result: Option<&ValidationResult>) -> DecisionState {
    match (status, result) {
        (_, Some(result)) if result.approved => DecisionState::Approved {
            message: result.message.clone(),
        },
        (_, Some(result)) => DecisionState::Rejected {
            message: result.message.clone(),
        },
        (ApplicationStatus::Pending, None) => DecisionState::AwaitingDecision,
        (ApplicationStatus::Approved, None) => DecisionState::Approved {
            message: GENERIC_APPROVED_MESSAGE.to_string(),
        },
        (ApplicationStatus::Rejected, None) => DecisionState::Rejected {
            message: GENERIC_REJECTED_MESSAGE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(approved: bool, message: &str) -> ValidationResult {
        ValidationResult {
            application_id: "app-1".to_string(),
            approved,
            message: message.to_string(),
            validation_date: Utc::now(),
        }
    }

    #[test]
    fn pending_without_result_awaits_decision() {
        assert_eq!(
            present(ApplicationStatus::Pending, None),
            DecisionState::AwaitingDecision
        );
    }

    #[test]
    fn approved_result_wins() {
        let result = result(true, "Income verified");
        assert_eq!(
            present(ApplicationStatus::Pending, Some(&result)),
            DecisionState::Approved {
                message: "Income verified".to_string()
            }
        );
    }

    #[test]
    fn rejected_result_wins() {
        let result = result(false, "Insufficient income");
        assert_eq!(
            present(ApplicationStatus::Rejected, Some(&result)),
            DecisionState::Rejected {
                message: "Insufficient income".to_string()
            }
        );
    }

    #[test]
    fn terminal_status_without_result_still_renders() {
        assert!(matches!(
            present(ApplicationStatus::Approved, None),
            DecisionState::Approved { .. }
        ));
        assert!(matches!(
            present(ApplicationStatus::Rejected, None),
            DecisionState::Rejected { .. }
        ));
    }

    #[test]
    fn mapping_is_total_over_reachable_combinations() {
        let approved = result(true, "ok");
        let rejected = result(false, "no");
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            for result in [None, Some(&approved), Some(&rejected)] {
                // Must not panic for any combination.
                let _ = present(status, result);
            }
        }
    }
}
