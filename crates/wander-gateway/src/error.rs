//! Gateway error types
//!
//! Backend failures, surfaced verbatim to the initiating caller. The
//! gateway never remaps or swallows; degradation decisions (treating a
//! restore failure as unauthenticated, rolling back an optimistic
//! update) belong to the application layer.

use wander_core::WanderError;

/// Errors from backend gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Sign-in rejected the credentials
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Sign-up email is already registered
    #[error("email already registered: {email}")]
    EmailTaken {
        /// The conflicting email
        email: String,
    },

    /// Sign-up password rejected by the backend policy
    #[error("weak password: {reason}")]
    WeakPassword {
        /// Backend-provided reason
        reason: String,
    },

    /// Row or entity does not exist
    #[error("{entity} not found")]
    NotFound {
        /// What was looked up
        entity: String,
    },

    /// Write conflicted with an existing row (unique violation)
    #[error("conflict: {entity} already exists")]
    Conflict {
        /// What already exists
        entity: String,
    },

    /// Transport-level failure
    #[error("network error: {message}")]
    Network {
        /// Failure description
        message: String,
    },

    /// Backend rejected the call for another reason
    #[error("backend error: {message}")]
    Backend {
        /// Backend-provided message
        message: String,
    },

    /// No real backend credentials were supplied at launch
    #[error("backend is not configured")]
    NotConfigured,
}

impl GatewayError {
    /// Create a not found error.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(entity: impl Into<String>) -> Self {
        Self::Conflict {
            entity: entity.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<GatewayError> for WanderError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::InvalidCredentials => WanderError::permission_denied(err.to_string()),
            GatewayError::EmailTaken { .. } | GatewayError::Conflict { .. } => {
                WanderError::conflict(err.to_string())
            }
            GatewayError::WeakPassword { .. } => WanderError::invalid(err.to_string()),
            GatewayError::NotFound { .. } => WanderError::not_found(err.to_string()),
            GatewayError::Network { .. } | GatewayError::NotConfigured => {
                WanderError::network(err.to_string())
            }
            GatewayError::Backend { .. } => WanderError::internal(err.to_string()),
        }
    }
}
