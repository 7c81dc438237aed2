//! Form validation rules
//!
//! Stateless checks applied before any network call. Screens render the
//! field-level messages inline; a form that fails validation never reaches
//! the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Email
// =============================================================================

/// Email validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailError {
    /// Email is empty
    Required,
    /// Email is not a plausible address
    Invalid,
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Email is required"),
            Self::Invalid => write!(f, "Invalid email address"),
        }
    }
}

impl std::error::Error for EmailError {}

/// Validate an email address.
///
/// Accepts the shapes the backend accepts: one `@`, non-empty local part,
/// a domain containing a dot, no whitespace. This is a form-level gate,
/// not an RFC parser; the backend remains the authority.
pub fn validate_email(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::Required);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(EmailError::Invalid);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(EmailError::Invalid);
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(EmailError::Invalid);
    }
    // Domain needs an interior dot: "a.b", not ".b" or "a."
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(EmailError::Invalid);
    };
    if host.is_empty() || tld.is_empty() {
        return Err(EmailError::Invalid);
    }
    Ok(())
}

/// Check an email without an error detail.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}

// =============================================================================
// Password
// =============================================================================

/// Password validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasswordError {
    /// Shorter than `MIN_PASSWORD_LENGTH`
    TooShort,
    /// No lowercase letter
    MissingLowercase,
    /// No uppercase letter
    MissingUppercase,
    /// No digit
    MissingDigit,
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => {
                write!(f, "Password must be at least {MIN_PASSWORD_LENGTH} characters")
            }
            Self::MissingLowercase => {
                write!(f, "Password must contain at least one lowercase letter")
            }
            Self::MissingUppercase => {
                write!(f, "Password must contain at least one uppercase letter")
            }
            Self::MissingDigit => write!(f, "Password must contain at least one number"),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Validate a password against the sign-up policy.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    Ok(())
}

/// Check a password without an error detail.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    validate_password(password).is_ok()
}

// =============================================================================
// Username
// =============================================================================

/// Username validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsernameError {
    /// Shorter than `MIN_USERNAME_LENGTH`
    TooShort,
    /// Longer than `MAX_USERNAME_LENGTH`
    TooLong,
    /// Contains characters outside `[A-Za-z0-9_]`
    InvalidChars,
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => {
                write!(f, "Username must be at least {MIN_USERNAME_LENGTH} characters")
            }
            Self::TooLong => write!(f, "Username must be at most {MAX_USERNAME_LENGTH} characters"),
            Self::InvalidChars => {
                write!(f, "Username can only contain letters, numbers, and underscores")
            }
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validate a username.
pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    let length = username.chars().count();
    if length < MIN_USERNAME_LENGTH {
        return Err(UsernameError::TooShort);
    }
    if length > MAX_USERNAME_LENGTH {
        return Err(UsernameError::TooLong);
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(UsernameError::InvalidChars);
    }
    Ok(())
}

/// Check a username without an error detail.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    validate_username(username).is_ok()
}

// =============================================================================
// Sign-up form
// =============================================================================

/// Raw sign-up form input as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Optional handle
    pub username: Option<String>,
}

/// Per-field validation failures for a sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpFormErrors {
    /// Email failure, if any
    pub email: Option<EmailError>,
    /// Password failure, if any
    pub password: Option<PasswordError>,
    /// Username failure, if any
    pub username: Option<UsernameError>,
    /// Whether the display name is missing
    pub full_name_required: bool,
}

impl SignUpFormErrors {
    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.username.is_none()
            && !self.full_name_required
    }
}

impl SignUpForm {
    /// Validate every field, collecting all failures at once.
    ///
    /// Submission is blocked while this returns `Err`; no network call is
    /// issued for an invalid form.
    pub fn validate(&self) -> Result<(), SignUpFormErrors> {
        let errors = SignUpFormErrors {
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password).err(),
            username: self
                .username
                .as_deref()
                .and_then(|u| validate_username(u).err()),
            full_name_required: self.full_name.trim().is_empty(),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
