//! Session manager.
//!
//! Owns the authentication session state machine and coordinates the
//! credential store with the auth gateway. Both collaborators are injected
//! as capabilities, so the manager tests without a real storage backend or
//! network.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use loanwise_core::routing::{self, RouteDecision};
use loanwise_core::session::{
    AuthGateway, CredentialStore, Session, SessionStatus, StoredCredentials, User,
    validate_registration,
};
use loanwise_core::{LoanwiseError, Result};

/// Owns authentication state and the login/register/logout operations.
///
/// State changes are applied on full success only: the credential pair is
/// persisted before the in-memory session flips to `Authenticated`, so
/// "authenticated" always implies "token in the store".
pub struct SessionManager {
    credential_store: Arc<dyn CredentialStore>,
    gateway: Arc<dyn AuthGateway>,
    session: RwLock<Session>,
}

impl SessionManager {
    /// Creates a manager with an `Anonymous` session.
    pub fn new(credential_store: Arc<dyn CredentialStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            credential_store,
            gateway,
            session: RwLock::new(Session::anonymous()),
        }
    }

    /// Restores the session from the credential store.
    ///
    /// Called once at startup. A stored token makes the session
    /// `Authenticated` optimistically; no network round-trip is required,
    /// and staleness is tolerated until the next authenticated call fails.
    pub async fn restore_from_storage(&self) -> Result<SessionStatus> {
        let stored = self.credential_store.load().await?;
        let mut session = self.session.write().await;
        match stored {
            Some(StoredCredentials { token, user }) => {
                session.authenticate(token, user);
            }
            None => session.reset(),
        }
        Ok(session.status())
    }

    /// Authenticates with the backend and persists the credential pair.
    ///
    /// On failure the session is `Failed` with the backend message (or a
    /// generic "Login failed") and nothing is persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.session.write().await.begin_authentication();

        match self.gateway.login(email, password).await {
            Ok(outcome) => self.complete_authentication(outcome.token, outcome.user).await,
            Err(err) => {
                self.session.write().await.fail(err.banner_message());
                Err(err)
            }
        }
    }

    /// Creates an account, then authenticates like [`SessionManager::login`].
    ///
    /// Field-level validation (password length, email plausibility) runs
    /// before any network call; on local failure the field errors are
    /// returned and the session state is left untouched.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let field_errors = validate_registration(name, email, password);
        if !field_errors.is_empty() {
            return Err(LoanwiseError::Validation(field_errors));
        }

        self.session.write().await.begin_authentication();

        match self.gateway.register(name, email, password).await {
            Ok(outcome) => self.complete_authentication(outcome.token, outcome.user).await,
            Err(err) => {
                self.session.write().await.fail(err.banner_message());
                Err(err)
            }
        }
    }

    /// Clears the credential store and resets the session to `Anonymous`.
    ///
    /// Always succeeds and is idempotent; a storage failure is logged and
    /// does not keep the session alive.
    pub async fn logout(&self) {
        self.session.write().await.reset();
        if let Err(err) = self.credential_store.clear().await {
            warn!(error = %err, "failed to clear credential store on logout");
        }
    }

    /// Refreshes the cached user record for an authenticated session.
    ///
    /// A rejected credential check demotes the session to `Anonymous` and
    /// clears the store; a network failure leaves the session untouched.
    pub async fn refresh_profile(&self) -> Result<User> {
        let token = {
            let session = self.session.read().await;
            session
                .token()
                .map(str::to_string)
                .ok_or_else(|| LoanwiseError::invalid_credentials("Not logged in"))?
        };

        match self.gateway.profile(&token).await {
            Ok(user) => {
                self.credential_store
                    .save(&StoredCredentials {
                        token,
                        user: user.clone(),
                    })
                    .await?;
                self.session.write().await.refresh_user(user.clone());
                Ok(user)
            }
            Err(err @ LoanwiseError::InvalidCredentials { .. }) => {
                info!("stored credential rejected, resetting session");
                self.logout().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Drops a `Failed` session back to `Anonymous` (the dismissed-banner
    /// path).
    pub async fn clear_error(&self) {
        self.session.write().await.clear_error();
    }

    /// Decides a navigation against the current session status.
    pub async fn route(&self, path: &str) -> RouteDecision {
        routing::decide(path, self.status().await)
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.read().await.status()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.user().cloned()
    }

    /// Persists the pair, then flips the in-memory session. Ordering keeps
    /// the invariant that an authenticated session implies a stored token.
    async fn complete_authentication(&self, token: String, user: User) -> Result<User> {
        let stored = StoredCredentials {
            token: token.clone(),
            user: user.clone(),
        };
        if let Err(err) = self.credential_store.save(&stored).await {
            self.session.write().await.fail(err.banner_message());
            return Err(err);
        }

        self.session.write().await.authenticate(token, user.clone());
        info!(user_id = %user.id, "session authenticated");
        Ok(user)
    }
}
