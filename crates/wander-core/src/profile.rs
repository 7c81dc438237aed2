//! User profile model
//!
//! Mirrors the backend `profiles` row: the mutable extended record keyed
//! by the authenticated user's id. At most one profile exists per user.
//! The role union is closed; unknown tags are rejected at the boundary
//! instead of falling through.

use crate::identifiers::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Marketplace role a user selects during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages properties and accepts collaborations with creators
    Host,
    /// Creates content and collaborates with hosts
    Creator,
    /// Offers professional services to hosts and creators
    Jolly,
    /// Platform-side account manager
    Manager,
}

impl Role {
    /// Stable lowercase tag used by the backend rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Creator => "creator",
            Self::Jolly => "jolly",
            Self::Manager => "manager",
        }
    }

    /// All roles a user may pick during onboarding.
    ///
    /// `Manager` is assigned out of band and never offered on the role
    /// selection screen.
    pub fn selectable() -> &'static [Role] {
        &[Self::Host, Self::Creator, Self::Jolly]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unknown role tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {tag}")]
pub struct RoleParseError {
    /// The rejected tag
    pub tag: String,
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Self::Host),
            "creator" => Ok(Self::Creator),
            "jolly" => Ok(Self::Jolly),
            "manager" => Ok(Self::Manager),
            other => Err(RoleParseError {
                tag: other.to_string(),
            }),
        }
    }
}

/// Mutable extended user record, one row per authenticated user.
///
/// Fetched when an identity becomes available, refreshed on demand after
/// mutation, cleared when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Same id as the auth subject
    pub id: UserId,
    /// Email copied from the auth record at sign-up
    pub email: String,
    /// Display name
    pub full_name: Option<String>,
    /// Unique handle
    pub username: Option<String>,
    /// Avatar image reference
    pub avatar_url: Option<String>,
    /// Free-form bio
    pub bio: Option<String>,
    /// Selected marketplace role; `None` until onboarding picks one
    pub role: Option<Role>,

    // Location
    /// Human-readable location label
    pub location: Option<String>,
    /// Latitude, if the user shared a position
    pub latitude: Option<f64>,
    /// Longitude, if the user shared a position
    pub longitude: Option<f64>,

    // Stats
    /// Gamification points
    pub points: i64,
    /// Follower count (denormalized by the backend)
    pub followers_count: i64,
    /// Following count (denormalized by the backend)
    pub following_count: i64,

    // Status
    /// Whether the user finished onboarding; gates the main app
    pub onboarding_completed: bool,
    /// Verified badge
    pub is_verified: bool,
    /// Soft-delete flag
    pub is_active: bool,

    // Timestamps
    /// Row creation time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last row update time
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Last activity, if tracked
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_seen_at: Option<OffsetDateTime>,
}

impl Profile {
    /// Minimal profile as created at sign-up time.
    pub fn new(id: UserId, email: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: None,
            username: None,
            avatar_url: None,
            bio: None,
            role: None,
            location: None,
            latitude: None,
            longitude: None,
            points: 0,
            followers_count: 0,
            following_count: 0,
            onboarding_completed: false,
            is_verified: false,
            is_active: true,
            created_at,
            updated_at: created_at,
            last_seen_at: None,
        }
    }

    /// Display name, falling back to username, then email.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.email)
    }
}

/// Partial profile update.
///
/// Only the populated fields are written; the backend returns the updated
/// row. Covers exactly the fields the client writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New avatar reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New bio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New role selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Onboarding completion flip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

impl ProfilePatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the onboarding completion flag.
    pub fn onboarding_completed(mut self, completed: bool) -> Self {
        self.onboarding_completed = Some(completed);
        self
    }

    /// Set the display name.
    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the avatar reference.
    pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Set the bio.
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Whether the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply this patch to a profile row, bumping `updated_at`.
    pub fn apply_to(&self, profile: &mut Profile, now: OffsetDateTime) {
        if let Some(name) = &self.full_name {
            profile.full_name = Some(name.clone());
        }
        if let Some(username) = &self.username {
            profile.username = Some(username.clone());
        }
        if let Some(url) = &self.avatar_url {
            profile.avatar_url = Some(url.clone());
        }
        if let Some(bio) = &self.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(role) = self.role {
            profile.role = Some(role);
        }
        if let Some(completed) = self.onboarding_completed {
            profile.onboarding_completed = completed;
        }
        profile.updated_at = now;
    }
}
