//! Session and identity types
//!
//! A `Session` is the credential bundle the backend issues on sign-in or
//! sign-up, restored at process start from the backend client's persisted
//! blob, replaced on token refresh, destroyed on sign-out. The session
//! controller in `wander-app` is the only component that may replace or
//! clear it; everything else reads it through the published snapshot.

use crate::identifiers::UserId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The authenticated principal, derived from a session.
///
/// Exists only while a session exists. Immutable: a new sign-in produces a
/// new `Identity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend-issued subject id, shared with the `profiles` table
    pub id: UserId,
    /// Email the principal authenticated with
    pub email: String,
}

/// Backend-issued credential bundle enabling authenticated calls.
///
/// Opaque to the application: tokens are carried, never inspected beyond
/// the expiry check. The persisted format belongs to the backend client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to authenticated calls
    pub access_token: String,
    /// Token used by the backend client to mint a fresh access token
    pub refresh_token: String,
    /// Access token expiry
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// The principal this session authenticates
    pub identity: Identity,
}

impl Session {
    /// Whether the access token has expired at `now`.
    ///
    /// Refresh is the backend client's job; this is only a display/debug
    /// aid and never gates a call.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// The authenticated user's id.
    pub fn user_id(&self) -> UserId {
        self.identity.id
    }
}
