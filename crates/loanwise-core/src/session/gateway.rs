//! Authentication network seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::User;

/// Successful authentication response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub token: String,
    pub user: User,
}

/// Network operations for authentication.
///
/// Implemented over HTTP by `loanwise-api`; mocked in tests. Local
/// validation never reaches this trait: callers run field checks first and
/// only call the gateway with plausible input.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token and user record.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on a structured backend rejection, `Network`
    /// otherwise.
    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome>;

    /// Creates an account, then behaves like [`AuthGateway::login`].
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthOutcome>;

    /// Fetches the profile for the bearer token.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the token is rejected, `Network` otherwise.
    async fn profile(&self, token: &str) -> Result<User>;
}
