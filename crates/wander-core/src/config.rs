//! Application configuration
//!
//! Backend coordinates come from the environment at build/launch time.
//! A missing configuration degrades to a non-functional placeholder
//! backend instead of failing fast: the app must still boot and render
//! the unauthenticated flow.

use serde::{Deserialize, Serialize};

/// Environment variable holding the backend project URL.
pub const BACKEND_URL_VAR: &str = "WANDER_BACKEND_URL";

/// Environment variable holding the backend public (anon) key.
pub const BACKEND_KEY_VAR: &str = "WANDER_BACKEND_KEY";

const PLACEHOLDER_URL: &str = "https://placeholder.invalid";
const PLACEHOLDER_KEY: &str = "placeholder-anon-key";

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL
    pub url: String,
    /// Public API key
    pub anon_key: String,
    /// Whether real credentials were supplied
    configured: bool,
}

impl BackendConfig {
    /// Build from explicit values.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            configured: true,
        }
    }

    /// Placeholder used when the environment supplies nothing.
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_URL.to_string(),
            anon_key: PLACEHOLDER_KEY.to_string(),
            configured: false,
        }
    }

    /// Whether real credentials were supplied.
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Feed pagination bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when screens do not override it
    pub default_page_size: u32,
    /// Hard upper bound on a requested page size
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Content length limits enforced by forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLimits {
    /// Maximum bio length in characters
    pub max_bio_length: usize,
    /// Maximum post body length in characters
    pub max_post_length: usize,
}

impl Default for SocialLimits {
    fn default() -> Self {
        Self {
            max_bio_length: 500,
            max_post_length: 2000,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// Feed pagination bounds
    pub pagination: PaginationConfig,
    /// Content length limits
    pub social: SocialLimits,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Both `WANDER_BACKEND_URL` and `WANDER_BACKEND_KEY` must be present
    /// and non-empty for a configured backend; otherwise the placeholder
    /// backend is used and `backend.is_configured()` reports `false`.
    pub fn from_env() -> Self {
        let url = std::env::var(BACKEND_URL_VAR).unwrap_or_default();
        let key = std::env::var(BACKEND_KEY_VAR).unwrap_or_default();

        let backend = if url.is_empty() || key.is_empty() {
            BackendConfig::placeholder()
        } else {
            BackendConfig::new(url, key)
        };

        Self {
            backend,
            pagination: PaginationConfig::default(),
            social: SocialLimits::default(),
        }
    }

    /// Configuration wired to explicit backend credentials.
    pub fn with_backend(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig::new(url, anon_key),
            pagination: PaginationConfig::default(),
            social: SocialLimits::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::placeholder(),
            pagination: PaginationConfig::default(),
            social: SocialLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_when_unconfigured() {
        let config = AppConfig::default();
        assert!(!config.backend.is_configured());
        assert_eq!(config.backend.anon_key, PLACEHOLDER_KEY);
    }

    #[test]
    fn test_explicit_backend_is_configured() {
        let config = AppConfig::with_backend("https://proj.example.com", "anon-key");
        assert!(config.backend.is_configured());
        assert_eq!(config.backend.url, "https://proj.example.com");
    }

    #[test]
    fn test_default_limits() {
        let config = AppConfig::default();
        assert_eq!(config.pagination.default_page_size, 20);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.social.max_post_length, 2000);
        assert_eq!(config.social.max_bio_length, 500);
    }
}
