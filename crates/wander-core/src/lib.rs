//! Wander Core - Domain Model Layer
//!
//! This crate provides the shared domain model for the Wander client core:
//!
//! - Identifiers: `UserId`, `PostId`, `CommentId`, `PropertyId`
//! - Session model: `Session`, `Identity`
//! - User model: `Profile`, `Role`, `ProfilePatch`
//! - Content model: `Post`, `Comment`, `FeedPage` and status enums
//! - Listing model: `Property` and its status enums
//! - Validation: email/password/username rules used by forms
//! - Formatting: date/relative-time, count abbreviation, truncation
//! - Configuration: environment-derived `AppConfig`
//!
//! # Architecture
//!
//! This is the foundation crate: it performs no I/O and holds no state.
//! The gateway layer (`wander-gateway`) moves these types over the wire;
//! the application layer (`wander-app`) derives UI-facing state from them.
//!
//! # Ownership rules
//!
//! `Session` and `Profile` are mutated only by the session controller in
//! `wander-app`. Everything else treats them as read-only inputs.

pub mod config;
pub mod error;
pub mod format;
pub mod identifiers;
pub mod post;
pub mod profile;
pub mod property;
pub mod session;
pub mod validation;

// Re-export primary types
pub use config::{AppConfig, BackendConfig, PaginationConfig, SocialLimits};
pub use error::{Result, WanderError};
pub use format::{
    format_currency, format_date, format_number_abbreviated, format_relative_time, truncate_text,
};
pub use identifiers::{CommentId, PostId, PropertyId, UserId};
pub use post::{
    ApprovalStatus, Comment, CommentAuthor, FeedPage, MediaKind, NewComment, NewPost, Post,
    PostAuthor, PostMedia, PostType, Visibility,
};
pub use profile::{Profile, ProfilePatch, Role, RoleParseError};
pub use property::{Property, PropertyStatus, PropertyType};
pub use session::{Identity, Session};
pub use validation::{
    is_valid_email, is_valid_password, is_valid_username, validate_email, validate_password,
    validate_username, SignUpForm, SignUpFormErrors,
};
