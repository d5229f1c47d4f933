//! Credential store capability trait.
//!
//! Durable key/value persistence for the session token and cached user
//! profile. Implementations live in `loanwise-infrastructure`; the trait is
//! defined here so `SessionManager` and the route guard can be tested
//! without a real storage backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::model::User;

/// The durable part of a session, persisted as a single document.
///
/// Token and user are stored together so a reader can never observe a token
/// without its paired user record or vice versa. Absence of the stored
/// document is the canonical "logged out" signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    pub token: String,
    pub user: User,
}

/// Durable persistence for the session credential pair.
///
/// Writes must be atomic with respect to reads: a concurrent `load` sees
/// either the previous pair or the new pair, never a mix.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads the stored credential pair. `Ok(None)` means logged out.
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Persists the credential pair, replacing any previous one.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Removes the stored credential pair. Idempotent.
    async fn clear(&self) -> Result<()>;
}
