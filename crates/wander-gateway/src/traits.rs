//! Gateway trait seams
//!
//! Domain operations translated one-to-one into backend calls. Each
//! method is a single round trip; the implementation performs no retry
//! and surfaces errors verbatim.

use crate::error::GatewayError;
use crate::events::AuthChange;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use wander_core::{
    Comment, FeedPage, NewComment, NewPost, Post, PostId, Profile, ProfilePatch, Session, UserId,
};

/// Sign-up request fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Display name, stored on the profile row
    pub full_name: String,
    /// Optional handle, stored on the profile row
    pub username: Option<String>,
}

/// Sign-in request fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Authentication operations.
///
/// `sign_up` performs identity creation followed by a profile-row insert.
/// The two steps are not atomic: a profile insert failure after identity
/// creation propagates, and the identity is not rolled back by this
/// layer.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an identity and its profile row, establishing a session.
    async fn sign_up(&self, request: SignUpRequest) -> Result<Session, GatewayError>;

    /// Establish a session from credentials.
    async fn sign_in(&self, request: SignInRequest) -> Result<Session, GatewayError>;

    /// End the current session. Emits a sign-out auth change.
    async fn sign_out(&self) -> Result<(), GatewayError>;

    /// Read the persisted session blob, if any.
    ///
    /// The blob format belongs to the backend client and is opaque here.
    async fn restore_session(&self) -> Result<Option<Session>, GatewayError>;

    /// Subscribe to session-change notifications.
    ///
    /// Events arrive in emission order. Fails only if the notification
    /// channel cannot be established.
    fn subscribe(&self) -> Result<broadcast::Receiver<AuthChange>, GatewayError>;

    /// Dispatch a password-reset link to `email`.
    async fn reset_password(&self, email: &str) -> Result<(), GatewayError>;

    /// Replace the authenticated user's password.
    async fn update_password(&self, new_password: &str) -> Result<(), GatewayError>;
}

/// Profile row operations.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch the profile row for `user_id`. Absence is not an error.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError>;

    /// Apply a partial update and return the updated row.
    ///
    /// Fails if the row is missing or a constraint is violated.
    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<Profile, GatewayError>;
}

/// Post, like-edge, and comment operations.
///
/// Like/unlike and comment creation are two backend steps (row write,
/// then a counter RPC) that are not transactional from the client's
/// view: an edge write can succeed while the counter adjustment fails.
/// That window is a server-side concern and is not remediated here.
#[async_trait]
pub trait PostGateway: Send + Sync {
    /// One page of approved posts, newest first, with denormalized
    /// author and the exact total. An empty page is not an error.
    async fn get_feed_posts(&self, page: u32, page_size: u32) -> Result<FeedPage, GatewayError>;

    /// Fetch a single post by id.
    async fn get_post(&self, post_id: PostId) -> Result<Post, GatewayError>;

    /// Create a post; it enters moderation as pending.
    async fn create_post(&self, post: NewPost) -> Result<Post, GatewayError>;

    /// Insert a like edge, then invoke the increment counter RPC.
    async fn like_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError>;

    /// Delete the like edge, then invoke the decrement counter RPC.
    async fn unlike_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError>;

    /// Whether `user_id` has a like edge on `post_id`.
    async fn has_user_liked(&self, post_id: PostId, user_id: UserId)
        -> Result<bool, GatewayError>;

    /// Top-level comments on a post, newest first.
    async fn get_comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError>;

    /// Insert a comment row, then invoke the comment counter RPC.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, GatewayError>;
}

/// The full backend surface the application layer consumes.
pub trait Backend: AuthGateway + ProfileGateway + PostGateway {}

impl<T: AuthGateway + ProfileGateway + PostGateway> Backend for T {}
