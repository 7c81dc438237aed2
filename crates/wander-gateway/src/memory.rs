//! In-memory backend
//!
//! A complete in-process implementation of the gateway traits for tests
//! and local development. Holds all rows in a registry behind a shared
//! lock, emits auth changes over a broadcast channel, and simulates the
//! backend client's persisted session blob.
//!
//! Fault injection poisons exactly one upcoming step, which is how the
//! partial-failure windows of the real backend (edge write succeeding
//! while the counter RPC fails, identity created while the profile
//! insert fails) are reproduced deterministically.

use crate::error::GatewayError;
use crate::events::AuthChange;
use crate::traits::{AuthGateway, PostGateway, ProfileGateway, SignInRequest, SignUpRequest};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;
use wander_core::{
    ApprovalStatus, Comment, CommentAuthor, CommentId, FeedPage, Identity, NewComment, NewPost,
    Post, PostAuthor, PostId, Profile, ProfilePatch, Session, UserId,
};

const EVENT_CHANNEL_CAPACITY: usize = 32;
const SESSION_LIFETIME: Duration = Duration::hours(1);

/// A step that can be poisoned to fail exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Sign-in call
    SignIn,
    /// Profile-row insert during sign-up (after identity creation)
    ProfileInsert,
    /// Profile-row select
    ProfileFetch,
    /// Profile-row update
    ProfileUpdate,
    /// Feed query
    FeedQuery,
    /// Like-edge insert
    LikeEdge,
    /// Like-edge delete
    UnlikeEdge,
    /// Like counter RPC (increment or decrement, after the edge write)
    LikeCounter,
    /// Comment-row insert
    CommentInsert,
    /// Comment counter RPC (after the comment insert)
    CommentCounter,
}

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
}

#[derive(Debug, Default)]
struct Registry {
    /// Credentials by email
    accounts: HashMap<String, Account>,
    /// Profile rows by user id
    profiles: HashMap<UserId, Profile>,
    /// Post rows by id
    posts: HashMap<PostId, Post>,
    /// Like edges; uniqueness pair (post, user)
    likes: HashSet<(PostId, UserId)>,
    /// Comment rows
    comments: Vec<Comment>,
    /// Simulated persisted session blob
    persisted_session: Option<Session>,
    /// One-shot poisoned steps
    faults: HashSet<Fault>,
}

impl Registry {
    /// Consume a poisoned step, if armed.
    fn take_fault(&mut self, fault: Fault) -> bool {
        self.faults.remove(&fault)
    }
}

/// In-memory backend for testing and local development.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    registry: Arc<RwLock<Registry>>,
    events: broadcast::Sender<AuthChange>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            events,
        }
    }

    /// Poison one upcoming step.
    pub async fn fail_next(&self, fault: Fault) {
        debug!(?fault, "arming one-shot fault");
        let mut registry = self.registry.write().await;
        registry.faults.insert(fault);
    }

    /// Re-mint the persisted session's tokens and emit a refresh event.
    ///
    /// Test hook for the token-refresh notification path; a real backend
    /// client does this on its own schedule.
    pub async fn refresh_session(&self) -> Result<Session, GatewayError> {
        let mut registry = self.registry.write().await;
        let old = registry
            .persisted_session
            .clone()
            .ok_or_else(|| GatewayError::backend("no session to refresh"))?;
        let session = mint_session(old.identity);
        registry.persisted_session = Some(session.clone());
        drop(registry);
        let _ = self.events.send(AuthChange::token_refreshed(session.clone()));
        Ok(session)
    }

    /// Insert a post row directly. Test seeding hook.
    pub async fn insert_post(&self, post: Post) {
        let mut registry = self.registry.write().await;
        registry.posts.insert(post.id, post);
    }

    /// Read back a post row as stored server-side.
    pub async fn post_row(&self, post_id: PostId) -> Option<Post> {
        let registry = self.registry.read().await;
        registry.posts.get(&post_id).cloned()
    }

    /// Whether a like edge exists server-side.
    pub async fn has_like_edge(&self, post_id: PostId, user_id: UserId) -> bool {
        let registry = self.registry.read().await;
        registry.likes.contains(&(post_id, user_id))
    }

    fn author_snapshot(profiles: &HashMap<UserId, Profile>, author_id: UserId) -> Option<PostAuthor> {
        profiles.get(&author_id).map(|p| PostAuthor {
            id: p.id,
            full_name: p.full_name.clone(),
            username: p.username.clone(),
            avatar_url: p.avatar_url.clone(),
            role: p.role,
            is_verified: p.is_verified,
        })
    }
}

fn mint_session(identity: Identity) -> Session {
    Session {
        access_token: format!("access-{}", Uuid::new_v4()),
        refresh_token: format!("refresh-{}", Uuid::new_v4()),
        expires_at: OffsetDateTime::now_utc() + SESSION_LIFETIME,
        identity,
    }
}

#[async_trait]
impl AuthGateway for MemoryBackend {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Session, GatewayError> {
        let mut registry = self.registry.write().await;

        if registry.accounts.contains_key(&request.email) {
            return Err(GatewayError::EmailTaken {
                email: request.email,
            });
        }

        // Identity creation succeeds first.
        let user_id = UserId::new_v4();
        registry.accounts.insert(
            request.email.clone(),
            Account {
                user_id,
                password: request.password.clone(),
            },
        );

        // Profile-row insert is a second, separate step. If it fails the
        // identity stays behind; this layer does not roll it back.
        if registry.take_fault(Fault::ProfileInsert) {
            return Err(GatewayError::backend("profile insert failed"));
        }
        let now = OffsetDateTime::now_utc();
        let mut profile = Profile::new(user_id, request.email.clone(), now);
        profile.full_name = Some(request.full_name);
        profile.username = request.username;
        registry.profiles.insert(user_id, profile);

        let session = mint_session(Identity {
            id: user_id,
            email: request.email,
        });
        registry.persisted_session = Some(session.clone());
        drop(registry);

        debug!(user_id = %session.user_id(), "account created");
        let _ = self.events.send(AuthChange::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Session, GatewayError> {
        let mut registry = self.registry.write().await;

        if registry.take_fault(Fault::SignIn) {
            return Err(GatewayError::network("connection reset"));
        }

        let account = registry
            .accounts
            .get(&request.email)
            .filter(|account| account.password == request.password)
            .cloned()
            .ok_or(GatewayError::InvalidCredentials)?;

        let session = mint_session(Identity {
            id: account.user_id,
            email: request.email,
        });
        registry.persisted_session = Some(session.clone());
        drop(registry);

        let _ = self.events.send(AuthChange::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        let mut registry = self.registry.write().await;
        registry.persisted_session = None;
        drop(registry);

        let _ = self.events.send(AuthChange::signed_out());
        Ok(())
    }

    async fn restore_session(&self) -> Result<Option<Session>, GatewayError> {
        let registry = self.registry.read().await;
        Ok(registry.persisted_session.clone())
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<AuthChange>, GatewayError> {
        Ok(self.events.subscribe())
    }

    async fn reset_password(&self, email: &str) -> Result<(), GatewayError> {
        if !email.contains('@') {
            return Err(GatewayError::backend("invalid email"));
        }
        // Dispatch is fire-and-forget; unknown addresses are not revealed.
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), GatewayError> {
        let mut registry = self.registry.write().await;
        let email = registry
            .persisted_session
            .as_ref()
            .map(|s| s.identity.email.clone())
            .ok_or_else(|| GatewayError::backend("not authenticated"))?;
        if let Some(account) = registry.accounts.get_mut(&email) {
            account.password = new_password.to_string();
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileGateway for MemoryBackend {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError> {
        let mut registry = self.registry.write().await;
        if registry.take_fault(Fault::ProfileFetch) {
            return Err(GatewayError::network("profile select failed"));
        }
        Ok(registry.profiles.get(&user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        let mut registry = self.registry.write().await;
        if registry.take_fault(Fault::ProfileUpdate) {
            return Err(GatewayError::network("profile update failed"));
        }
        let now = OffsetDateTime::now_utc();
        let profile = registry
            .profiles
            .get_mut(&user_id)
            .ok_or_else(|| GatewayError::not_found("profile"))?;
        patch.apply_to(profile, now);
        Ok(profile.clone())
    }
}

#[async_trait]
impl PostGateway for MemoryBackend {
    async fn get_feed_posts(&self, page: u32, page_size: u32) -> Result<FeedPage, GatewayError> {
        let mut registry = self.registry.write().await;
        if registry.take_fault(Fault::FeedQuery) {
            return Err(GatewayError::network("feed query failed"));
        }

        let mut approved: Vec<&Post> = registry
            .posts
            .values()
            .filter(|post| post.approval_status == ApprovalStatus::Approved)
            .collect();
        approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = approved.len() as u64;

        let from = page as usize * page_size as usize;
        let posts = approved
            .into_iter()
            .skip(from)
            .take(page_size as usize)
            .map(|post| {
                let mut post = post.clone();
                post.author = Self::author_snapshot(&registry.profiles, post.author_id);
                post
            })
            .collect();

        Ok(FeedPage { posts, total })
    }

    async fn get_post(&self, post_id: PostId) -> Result<Post, GatewayError> {
        let registry = self.registry.read().await;
        let mut post = registry
            .posts
            .get(&post_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found("post"))?;
        post.author = Self::author_snapshot(&registry.profiles, post.author_id);
        Ok(post)
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, GatewayError> {
        let mut registry = self.registry.write().await;
        if !registry.profiles.contains_key(&new_post.author_id) {
            return Err(GatewayError::not_found("author profile"));
        }
        let now = OffsetDateTime::now_utc();
        let post = Post {
            id: PostId::new_v4(),
            author_id: new_post.author_id,
            content: new_post.content,
            media: new_post.media,
            post_type: new_post.post_type,
            property_id: new_post.property_id,
            collaboration_id: None,
            likes_count: 0,
            comments_count: 0,
            reposts_count: 0,
            views_count: 0,
            approval_status: ApprovalStatus::Pending,
            is_pinned: false,
            visibility: new_post.visibility,
            created_at: now,
            updated_at: now,
            author: None,
            is_liked: false,
            is_reposted: false,
            is_bookmarked: false,
        };
        registry.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn like_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError> {
        let mut registry = self.registry.write().await;

        // Step 1: edge insert.
        if registry.take_fault(Fault::LikeEdge) {
            return Err(GatewayError::network("like insert failed"));
        }
        if !registry.posts.contains_key(&post_id) {
            return Err(GatewayError::not_found("post"));
        }
        if !registry.likes.insert((post_id, user_id)) {
            return Err(GatewayError::conflict("post_like"));
        }

        // Step 2: counter RPC. Failure here leaves the edge behind and
        // the counter stale, matching the real backend's window.
        if registry.take_fault(Fault::LikeCounter) {
            return Err(GatewayError::network("increment_post_likes failed"));
        }
        if let Some(post) = registry.posts.get_mut(&post_id) {
            post.likes_count += 1;
        }
        Ok(())
    }

    async fn unlike_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError> {
        let mut registry = self.registry.write().await;

        // Step 1: edge delete. Deleting an absent edge is not an error.
        if registry.take_fault(Fault::UnlikeEdge) {
            return Err(GatewayError::network("like delete failed"));
        }
        if !registry.posts.contains_key(&post_id) {
            return Err(GatewayError::not_found("post"));
        }
        registry.likes.remove(&(post_id, user_id));

        // Step 2: counter RPC.
        if registry.take_fault(Fault::LikeCounter) {
            return Err(GatewayError::network("decrement_post_likes failed"));
        }
        if let Some(post) = registry.posts.get_mut(&post_id) {
            post.likes_count = (post.likes_count - 1).max(0);
        }
        Ok(())
    }

    async fn has_user_liked(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<bool, GatewayError> {
        let registry = self.registry.read().await;
        Ok(registry.likes.contains(&(post_id, user_id)))
    }

    async fn get_comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError> {
        let registry = self.registry.read().await;
        let mut comments: Vec<Comment> = registry
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.parent_comment_id.is_none())
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, GatewayError> {
        let mut registry = self.registry.write().await;

        if registry.take_fault(Fault::CommentInsert) {
            return Err(GatewayError::network("comment insert failed"));
        }
        if !registry.posts.contains_key(&new_comment.post_id) {
            return Err(GatewayError::not_found("post"));
        }

        let now = OffsetDateTime::now_utc();
        let user = registry.profiles.get(&new_comment.user_id).map(|p| CommentAuthor {
            id: p.id,
            full_name: p.full_name.clone(),
            username: p.username.clone(),
            avatar_url: p.avatar_url.clone(),
            is_verified: p.is_verified,
        });
        let comment = Comment {
            id: CommentId::new_v4(),
            post_id: new_comment.post_id,
            user_id: new_comment.user_id,
            parent_comment_id: new_comment.parent_comment_id,
            content: new_comment.content,
            likes_count: 0,
            replies_count: 0,
            created_at: now,
            updated_at: now,
            user,
            is_liked: false,
        };
        registry.comments.push(comment.clone());

        // Counter RPC after the insert; failure leaves the row behind.
        if registry.take_fault(Fault::CommentCounter) {
            return Err(GatewayError::network("increment_post_comments failed"));
        }
        if let Some(post) = registry.posts.get_mut(&new_comment.post_id) {
            post.comments_count += 1;
        }
        Ok(comment)
    }
}
