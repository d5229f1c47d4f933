//! In-memory credential store.

use async_trait::async_trait;
use loanwise_core::Result;
use loanwise_core::session::{CredentialStore, StoredCredentials};
use tokio::sync::RwLock;

/// A `CredentialStore` backed by process memory.
///
/// Nothing survives a restart; intended for tests and headless embeddings
/// where durable storage is unwanted.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a credential pair.
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.credentials.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.credentials.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanwise_core::session::User;

    #[tokio::test]
    async fn round_trip_and_clear() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let credentials = StoredCredentials {
            token: "tok-1".to_string(),
            user: User {
                id: "u-1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        };
        store.save(&credentials).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(credentials));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }
}
