//! Authentication session: state machine, credential persistence seam, and
//! the network gateway trait.

pub mod gateway;
pub mod model;
pub mod store;
pub mod validate;

pub use gateway::{AuthGateway, AuthOutcome};
pub use model::{Session, SessionStatus, User};
pub use store::{CredentialStore, StoredCredentials};
pub use validate::{MIN_PASSWORD_LEN, validate_registration};
