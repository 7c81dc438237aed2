//! Auth-change notifications
//!
//! The backend emits a notification whenever the session changes: sign-in
//! (here or on another device), token refresh, sign-out. Events are
//! delivered in emission order and are not coalesced. Consumers replace
//! their held session with `session` on every event rather than guessing
//! from the kind.

use serde::{Deserialize, Serialize};
use wander_core::Session;

/// What kind of session change occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthChangeKind {
    /// A session was established
    SignedIn,
    /// The access token was refreshed; the session was replaced
    TokenRefreshed,
    /// The session ended
    SignedOut,
}

/// A session-change notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthChange {
    /// What happened
    pub kind: AuthChangeKind,
    /// The session now in effect; `None` after sign-out
    pub session: Option<Session>,
}

impl AuthChange {
    /// A sign-in notification.
    pub fn signed_in(session: Session) -> Self {
        Self {
            kind: AuthChangeKind::SignedIn,
            session: Some(session),
        }
    }

    /// A token-refresh notification carrying the replacement session.
    pub fn token_refreshed(session: Session) -> Self {
        Self {
            kind: AuthChangeKind::TokenRefreshed,
            session: Some(session),
        }
    }

    /// A sign-out notification.
    pub fn signed_out() -> Self {
        Self {
            kind: AuthChangeKind::SignedOut,
            session: None,
        }
    }
}
