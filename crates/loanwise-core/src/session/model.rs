//! Session domain model.
//!
//! This module contains the authentication session state machine. The
//! session is exclusively owned by the running client process; the
//! credential store holds its durable part (token + user) across restarts.

use serde::{Deserialize, Serialize};

/// Authenticated user identity as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Authentication state of the running client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No credential present; the default state at process start.
    Anonymous,
    /// A login or register call is in flight.
    Authenticating,
    /// A credential is present and assumed valid.
    Authenticated,
    /// The last login/register attempt was rejected.
    Failed,
}

/// The authenticated-identity state of the running client.
///
/// Invariant: `status == Authenticated` iff a token is present, and `user`
/// is present only when authenticated. The fields are private and every
/// transition goes through a method, so the invariant cannot be broken from
/// the outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    status: SessionStatus,
    token: Option<String>,
    user: Option<User>,
    /// Backend or generic failure message, present only when `Failed`.
    error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// Creates a session in the `Anonymous` state.
    pub fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            token: None,
            user: None,
            error: None,
        }
    }

    /// Marks a login/register call as in flight.
    ///
    /// Clears any previous failure message; the credential (if any) is
    /// dropped, since a new authentication attempt supersedes it.
    pub fn begin_authentication(&mut self) {
        self.status = SessionStatus::Authenticating;
        self.token = None;
        self.user = None;
        self.error = None;
    }

    /// Transitions to `Authenticated` with the given credential pair.
    pub fn authenticate(&mut self, token: String, user: User) {
        self.status = SessionStatus::Authenticated;
        self.token = Some(token);
        self.user = Some(user);
        self.error = None;
    }

    /// Transitions to `Failed` with a user-facing message.
    ///
    /// No credential is retained in this state.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Failed;
        self.token = None;
        self.user = None;
        self.error = Some(message.into());
    }

    /// Resets to `Anonymous`. Used on logout and on a rejected credential
    /// check. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::anonymous();
    }

    /// Drops a `Failed` state back to `Anonymous` (the dismissed-banner
    /// path). A no-op in any other state.
    pub fn clear_error(&mut self) {
        if self.status == SessionStatus::Failed {
            self.reset();
        }
    }

    /// Replaces the cached user record for an authenticated session.
    ///
    /// A no-op when not authenticated, so a late profile response cannot
    /// resurrect a logged-out session.
    pub fn refresh_user(&mut self, user: User) {
        if self.status == SessionStatus::Authenticated {
            self.user = Some(user);
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
