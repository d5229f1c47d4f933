//! Loan application lifecycle service.
//!
//! Submits completed drafts, fetches applications and decisions, and runs
//! the approval-request protocol over a client-side read cache. The cache
//! is never written back to the server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use loanwise_core::application::{
    ApprovalOutcome, LoanApplication, LoanGateway, ValidationResult,
};
use loanwise_core::config::ValidationPolicy;
use loanwise_core::draft::{LoanApplicationDraft, LoanSubmission};
use loanwise_core::presenter::{self, DecisionState};
use loanwise_core::{LoanwiseError, Result};

/// Cached view of one application, with the sequence number of the last
/// approval response applied to it.
#[derive(Debug, Clone)]
struct CacheEntry {
    application: LoanApplication,
    validation_result: Option<ValidationResult>,
    last_applied_approval: u64,
}

impl CacheEntry {
    fn new(application: LoanApplication) -> Self {
        Self {
            application,
            validation_result: None,
            last_applied_approval: 0,
        }
    }
}

/// Client-side lifecycle operations over the loan gateway.
///
/// Approval responses are applied to the cache in request order: each
/// request takes a per-application sequence number, and a response is
/// discarded when a later request has already been applied, so a stale
/// `Pending` snapshot can never overwrite a just-received decision.
pub struct LoanService {
    gateway: Arc<dyn LoanGateway>,
    policy: ValidationPolicy,
    cache: RwLock<HashMap<String, CacheEntry>>,
    approval_sequences: RwLock<HashMap<String, u64>>,
}

impl LoanService {
    pub fn new(gateway: Arc<dyn LoanGateway>, policy: ValidationPolicy) -> Self {
        Self {
            gateway,
            policy,
            cache: RwLock::new(HashMap::new()),
            approval_sequences: RwLock::new(HashMap::new()),
        }
    }

    /// Validates a draft and submits it.
    ///
    /// # Errors
    ///
    /// `DraftNotReady` with the outstanding field errors when the draft is
    /// incomplete; the draft is retained by the caller in that case.
    pub async fn submit_draft(&self, draft: &LoanApplicationDraft) -> Result<LoanApplication> {
        let submission = draft.to_submission(&self.policy)?;
        self.submit(submission).await
    }

    /// Submits a completed submission payload.
    ///
    /// Never retried automatically: a retry could create a duplicate
    /// application, so re-submitting is an explicit caller action.
    pub async fn submit(&self, submission: LoanSubmission) -> Result<LoanApplication> {
        let application = self.gateway.submit(&submission).await?;
        info!(application_id = %application.id, "application submitted");

        let mut cache = self.cache.write().await;
        cache.insert(application.id.clone(), CacheEntry::new(application.clone()));
        Ok(application)
    }

    /// Fetches one application and refreshes the cache.
    pub async fn fetch_application(&self, id: &str) -> Result<LoanApplication> {
        let application = self.gateway.fetch_application(id).await?;
        self.cache_application(application.clone()).await;
        Ok(application)
    }

    /// Fetches all applications owned by a user (the dashboard view).
    pub async fn fetch_applications_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<LoanApplication>> {
        let applications = self.gateway.fetch_applications_for_user(user_id).await?;
        for application in &applications {
            self.cache_application(application.clone()).await;
        }
        Ok(applications)
    }

    /// Fetches the decision record for an application, caching it when
    /// present. `Ok(None)` means the decision has not been requested yet.
    pub async fn fetch_validation_result(&self, id: &str) -> Result<Option<ValidationResult>> {
        let result = self.gateway.fetch_validation_result(id).await?;
        if let Some(result) = &result {
            let mut cache = self.cache.write().await;
            if let Some(entry) = cache.get_mut(id) {
                entry.validation_result = Some(result.clone());
            }
        }
        Ok(result)
    }

    /// Triggers server-side evaluation for a pending application.
    ///
    /// Refuses with `AlreadyDecided`, before any network call, when the
    /// cached application is already terminal. A failed request leaves the
    /// cache untouched, so the application stays visibly pending with a
    /// retry affordance.
    pub async fn request_approval(&self, id: &str) -> Result<ApprovalOutcome> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(id)
                && entry.application.status.is_terminal()
            {
                return Err(LoanwiseError::AlreadyDecided { id: id.to_string() });
            }
        }

        let sequence = self.next_approval_sequence(id).await;
        let outcome = self.gateway.request_approval(id).await?;
        Ok(self.apply_approval(id, sequence, outcome).await)
    }

    /// Renderable decision state for a cached application, if known.
    ///
    /// Reads only the cache; pair with the fetch operations to refresh it.
    pub async fn decision_state(&self, id: &str) -> Option<DecisionState> {
        let cache = self.cache.read().await;
        cache.get(id).map(|entry| {
            presenter::present(entry.application.status, entry.validation_result.as_ref())
        })
    }

    /// Cached application snapshot, if known.
    pub async fn cached_application(&self, id: &str) -> Option<LoanApplication> {
        let cache = self.cache.read().await;
        cache.get(id).map(|entry| entry.application.clone())
    }

    async fn cache_application(&self, application: LoanApplication) {
        let mut cache = self.cache.write().await;
        cache
            .entry(application.id.clone())
            .and_modify(|entry| entry.application = application.clone())
            .or_insert_with(|| CacheEntry::new(application));
    }

    /// Allocates the next approval request sequence number for an id.
    async fn next_approval_sequence(&self, id: &str) -> u64 {
        let mut sequences = self.approval_sequences.write().await;
        let counter = sequences.entry(id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Applies an approval response in request order.
    ///
    /// A response whose request predates the last applied one is discarded
    /// and the newer cached outcome is returned instead.
    async fn apply_approval(
        &self,
        id: &str,
        sequence: u64,
        outcome: ApprovalOutcome,
    ) -> ApprovalOutcome {
        let mut cache = self.cache.write().await;
        let entry = cache
            .entry(id.to_string())
            .or_insert_with(|| CacheEntry::new(outcome.application.clone()));

        if sequence <= entry.last_applied_approval {
            warn!(
                application_id = id,
                sequence, "discarding stale approval response"
            );
            // A newer request already completed; its cached state wins.
            if let Some(result) = entry.validation_result.clone() {
                return ApprovalOutcome {
                    application: entry.application.clone(),
                    validation_result: result,
                };
            }
            return outcome;
        }

        entry.last_applied_approval = sequence;
        entry.application = outcome.application.clone();
        entry.validation_result = Some(outcome.validation_result.clone());
        info!(
            application_id = id,
            approved = outcome.validation_result.approved,
            "decision applied"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loanwise_core::application::ApplicationStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn application(id: &str, status: ApplicationStatus) -> LoanApplication {
        LoanApplication {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            loan_amount: 5000.0,
            loan_purpose: "education".to_string(),
            loan_term_months: 36,
            employment_status: "Employed".to_string(),
            annual_income: 40000.0,
            status,
            created_at: Utc::now(),
        }
    }

    fn decision(id: &str, approved: bool) -> ValidationResult {
        ValidationResult {
            application_id: id.to_string(),
            approved,
            message: if approved { "ok" } else { "no" }.to_string(),
            validation_date: Utc::now(),
        }
    }

    struct MockLoanGateway {
        application: LoanApplication,
        approval: Result<ApprovalOutcome>,
        approval_calls: AtomicUsize,
    }

    impl MockLoanGateway {
        fn new(application: LoanApplication) -> Self {
            let approval = Ok(ApprovalOutcome {
                application: {
                    let mut approved = application.clone();
                    approved.status = ApplicationStatus::Approved;
                    approved
                },
                validation_result: decision(&application.id, true),
            });
            Self {
                application,
                approval,
                approval_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl LoanGateway for MockLoanGateway {
        async fn submit(&self, _submission: &LoanSubmission) -> Result<LoanApplication> {
            Ok(self.application.clone())
        }

        async fn fetch_application(&self, id: &str) -> Result<LoanApplication> {
            if id == self.application.id {
                Ok(self.application.clone())
            } else {
                Err(LoanwiseError::not_found("LoanApplication", id))
            }
        }

        async fn fetch_applications_for_user(
            &self,
            _user_id: &str,
        ) -> Result<Vec<LoanApplication>> {
            Ok(vec![self.application.clone()])
        }

        async fn fetch_validation_result(&self, _id: &str) -> Result<Option<ValidationResult>> {
            Ok(None)
        }

        async fn request_approval(&self, _id: &str) -> Result<ApprovalOutcome> {
            self.approval_calls.fetch_add(1, Ordering::SeqCst);
            self.approval.clone()
        }
    }

    fn service(gateway: Arc<MockLoanGateway>) -> LoanService {
        LoanService::new(gateway, ValidationPolicy::default())
    }

    #[tokio::test]
    async fn approval_on_terminal_application_fails_without_network_call() {
        let gateway = Arc::new(MockLoanGateway::new(application(
            "app-1",
            ApplicationStatus::Approved,
        )));
        let service = service(gateway.clone());

        // Prime the cache with the terminal application.
        service.fetch_application("app-1").await.unwrap();

        let err = service.request_approval("app-1").await.unwrap_err();
        assert!(matches!(err, LoanwiseError::AlreadyDecided { id } if id == "app-1"));
        assert_eq!(gateway.approval_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn approval_applies_decision_to_cache() {
        let gateway = Arc::new(MockLoanGateway::new(application(
            "app-1",
            ApplicationStatus::Pending,
        )));
        let service = service(gateway);

        service.fetch_application("app-1").await.unwrap();
        assert_eq!(
            service.decision_state("app-1").await,
            Some(DecisionState::AwaitingDecision)
        );

        let outcome = service.request_approval("app-1").await.unwrap();
        assert_eq!(outcome.application.status, ApplicationStatus::Approved);
        assert!(matches!(
            service.decision_state("app-1").await,
            Some(DecisionState::Approved { .. })
        ));
    }

    #[tokio::test]
    async fn stale_approval_response_is_discarded() {
        let gateway = Arc::new(MockLoanGateway::new(application(
            "app-1",
            ApplicationStatus::Pending,
        )));
        let service = service(gateway);
        service.fetch_application("app-1").await.unwrap();

        // Two requests in flight: the earlier one resolves last.
        let first = service.next_approval_sequence("app-1").await;
        let second = service.next_approval_sequence("app-1").await;

        let decided = ApprovalOutcome {
            application: application("app-1", ApplicationStatus::Rejected),
            validation_result: decision("app-1", false),
        };
        let stale = ApprovalOutcome {
            application: application("app-1", ApplicationStatus::Pending),
            validation_result: decision("app-1", true),
        };

        let applied = service.apply_approval("app-1", second, decided.clone()).await;
        assert_eq!(applied.application.status, ApplicationStatus::Rejected);

        // The late response from the first request must not overwrite the
        // decision; the newer cached outcome is returned instead.
        let returned = service.apply_approval("app-1", first, stale).await;
        assert_eq!(returned.application.status, ApplicationStatus::Rejected);
        assert_eq!(
            service
                .cached_application("app-1")
                .await
                .map(|app| app.status),
            Some(ApplicationStatus::Rejected)
        );
        assert!(matches!(
            service.decision_state("app-1").await,
            Some(DecisionState::Rejected { .. })
        ));
    }

    #[tokio::test]
    async fn failed_approval_leaves_application_pending() {
        let gateway = Arc::new(MockLoanGateway {
            application: application("app-1", ApplicationStatus::Pending),
            approval: Err(LoanwiseError::network("backend unreachable")),
            approval_calls: AtomicUsize::new(0),
        });
        let service = service(gateway);
        service.fetch_application("app-1").await.unwrap();

        let err = service.request_approval("app-1").await.unwrap_err();
        assert!(err.is_network());

        // Still pending, still showing the retry affordance.
        assert_eq!(
            service.decision_state("app-1").await,
            Some(DecisionState::AwaitingDecision)
        );
    }

    #[tokio::test]
    async fn incomplete_draft_is_rejected_before_the_gateway() {
        let gateway = Arc::new(MockLoanGateway::new(application(
            "app-1",
            ApplicationStatus::Pending,
        )));
        let service = service(gateway);

        let draft = LoanApplicationDraft::new();
        let err = service.submit_draft(&draft).await.unwrap_err();
        assert!(matches!(err, LoanwiseError::DraftNotReady(_)));
    }

    #[tokio::test]
    async fn dashboard_fetch_populates_the_cache() {
        let gateway = Arc::new(MockLoanGateway::new(application(
            "app-1",
            ApplicationStatus::Pending,
        )));
        let service = service(gateway);

        let applications = service.fetch_applications_for_user("u-1").await.unwrap();
        assert_eq!(applications.len(), 1);
        assert!(service.cached_application("app-1").await.is_some());
    }
}
