//! HTTP client for the Loanwise backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use tracing::{debug, info};

use loanwise_core::application::{
    ApprovalOutcome, LoanApplication, LoanGateway, ValidationResult,
};
use loanwise_core::config::ApiConfig;
use loanwise_core::draft::LoanSubmission;
use loanwise_core::session::{AuthGateway, AuthOutcome, CredentialStore, User};
use loanwise_core::{LoanwiseError, Result};

use crate::wire::{
    ApprovalResponse, AuthResponse, LoginRequest, RegisterRequest, auth_error, loan_error,
    submit_error,
};

/// REST client implementing the authentication and loan lifecycle gateways.
///
/// The bearer token is read from the injected credential store per request,
/// so the store stays the single source of truth: clearing it on logout
/// immediately de-authenticates every subsequent call.
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LoanwiseError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the stored bearer token.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when no credential is stored; the caller is
    /// logged out and the route guard should have prevented the call.
    async fn bearer(&self) -> Result<String> {
        self.credentials
            .load()
            .await?
            .map(|stored| stored.token)
            .ok_or_else(|| LoanwiseError::invalid_credentials("Not logged in"))
    }

    async fn authenticate(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        fallback: &str,
    ) -> Result<AuthOutcome> {
        debug!(path, "authentication request");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("{fallback}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(auth_error(status, &body, fallback));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to parse auth response: {e}")))?;

        Ok(AuthOutcome {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Encodes a submission as a multipart form: text parts for the field
    /// values, one file part per document named by its slot so the server
    /// can distinguish document types.
    async fn submission_form(&self, submission: &LoanSubmission) -> Result<multipart::Form> {
        let mut form = multipart::Form::new();

        for (name, value) in submission.fields() {
            form = form.text(name.clone(), value.clone());
        }

        for document in submission.documents() {
            let attachment = &document.attachment;
            let bytes = tokio::fs::read(&attachment.path).await?;
            let part = multipart::Part::bytes(bytes)
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| {
                    LoanwiseError::internal(format!(
                        "Invalid content type '{}': {e}",
                        attachment.content_type
                    ))
                })?;
            form = form.part(document.slot.wire_name(), part);
        }

        Ok(form)
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        self.authenticate("/auth/login", &LoginRequest { email, password }, "Login failed")
            .await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthOutcome> {
        self.authenticate(
            "/auth/register",
            &RegisterRequest {
                name,
                email,
                password,
            },
            "Registration failed",
        )
        .await
    }

    async fn profile(&self, token: &str) -> Result<User> {
        let response = self
            .client
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to fetch profile: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(auth_error(status, &body, "Failed to fetch profile"));
        }

        response
            .json()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to parse profile: {e}")))
    }
}

#[async_trait]
impl LoanGateway for ApiClient {
    async fn submit(&self, submission: &LoanSubmission) -> Result<LoanApplication> {
        let token = self.bearer().await?;
        let form = self.submission_form(submission).await?;

        // Not idempotent; never retried here, and never cancelled once
        // dispatched.
        let response = self
            .client
            .post(self.url("/application/submit"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to submit application: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(submit_error(status, &body));
        }

        let application: LoanApplication = response.json().await.map_err(|e| {
            LoanwiseError::network(format!("Failed to parse submission response: {e}"))
        })?;
        info!(application_id = %application.id, "loan application submitted");
        Ok(application)
    }

    async fn fetch_application(&self, id: &str) -> Result<LoanApplication> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(self.url(&format!("/loan/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to fetch application: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(loan_error(status, &body, id));
        }

        response
            .json()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to parse application: {e}")))
    }

    async fn fetch_applications_for_user(&self, user_id: &str) -> Result<Vec<LoanApplication>> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(self.url(&format!("/loan/user/{user_id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to fetch applications: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(loan_error(status, &body, user_id));
        }

        response
            .json()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to parse applications: {e}")))
    }

    async fn fetch_validation_result(&self, id: &str) -> Result<Option<ValidationResult>> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(self.url(&format!("/loan/{id}/validation-result")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                LoanwiseError::network(format!("Failed to fetch validation result: {e}"))
            })?;

        let status = response.status();
        // No decision yet: some deployments answer 204, others 404 on the
        // result resource. Both mean absence, not an error.
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(loan_error(status, &body, id));
        }

        let result: ValidationResult = response.json().await.map_err(|e| {
            LoanwiseError::network(format!("Failed to parse validation result: {e}"))
        })?;
        Ok(Some(result))
    }

    async fn request_approval(&self, id: &str) -> Result<ApprovalOutcome> {
        let token = self.bearer().await?;
        debug!(application_id = id, "requesting approval decision");
        let response = self
            .client
            .post(self.url(&format!("/loan/{id}/request-approval")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| LoanwiseError::network(format!("Failed to request approval: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(loan_error(status, &body, id));
        }

        let approval: ApprovalResponse = response.json().await.map_err(|e| {
            LoanwiseError::network(format!("Failed to parse approval response: {e}"))
        })?;

        Ok(ApprovalOutcome {
            application: approval.application,
            validation_result: approval.validation_log,
        })
    }
}
