//! Production wiring for the client services.

use std::sync::Arc;

use loanwise_api::ApiClient;
use loanwise_core::Result;
use loanwise_core::config::ClientConfig;
use loanwise_core::session::{AuthGateway, CredentialStore};
use loanwise_infrastructure::{FileCredentialStore, load_config};

use crate::loan_service::LoanService;
use crate::session_manager::SessionManager;

/// The wired client: session management and the loan lifecycle, sharing one
/// credential store and one HTTP client.
///
/// UI layers hold this by reference and call into the two services; they
/// own no state of their own.
pub struct LoanwiseApp {
    pub session: Arc<SessionManager>,
    pub loans: Arc<LoanService>,
}

impl LoanwiseApp {
    /// Wires the default production stack: configuration from disk, the
    /// file-backed credential store at the platform location, and the HTTP
    /// gateways.
    pub fn from_default_environment() -> Result<Self> {
        Self::with_config(load_config()?)
    }

    /// Wires the production stack with an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::default_location()?);
        let api = Arc::new(ApiClient::new(&config.api, store.clone())?);

        let auth_gateway: Arc<dyn AuthGateway> = api.clone();
        let session = Arc::new(SessionManager::new(store, auth_gateway));
        let loans = Arc::new(LoanService::new(api, config.validation));

        Ok(Self { session, loans })
    }
}
