//! Feed view and the optimistic like protocol
//!
//! Pages of approved posts are fetched through the gateway; per-post
//! interaction state (`liked`, `likes_count`) is owned here and mutated
//! optimistically: the UI-visible values flip before the network call and
//! revert if it fails.
//!
//! Rapid toggles on the same post are serialized through a per-post-id
//! guard, so each toggle observes the settled state of the previous one
//! and issues exactly one call matching its own target state. Toggles on
//! different posts proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::error;
use wander_core::{FeedPage, PaginationConfig, Post, PostId, Result, WanderError};
use wander_gateway::Backend;

use crate::session::SessionSnapshot;

/// Viewer-facing interaction state for one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostInteraction {
    /// Whether the viewer likes the post
    pub liked: bool,
    /// Like count shown next to the button
    pub likes_count: i64,
}

/// The feed: loaded pages plus per-post interaction state.
pub struct FeedView {
    backend: Arc<dyn Backend>,
    session: watch::Receiver<SessionSnapshot>,
    page_size: u32,

    posts: RwLock<Vec<Post>>,
    total: RwLock<u64>,
    interactions: RwLock<HashMap<PostId, PostInteraction>>,
    /// One guard per post id; created lazily, held across the mutation.
    guards: Mutex<HashMap<PostId, Arc<async_lock::Mutex<()>>>>,
}

impl FeedView {
    /// Create a feed over an injected backend and a session receiver.
    pub fn new(
        backend: Arc<dyn Backend>,
        session: watch::Receiver<SessionSnapshot>,
        pagination: &PaginationConfig,
    ) -> Self {
        Self {
            backend,
            session,
            page_size: pagination.default_page_size,
            posts: RwLock::new(Vec::new()),
            total: RwLock::new(0),
            interactions: RwLock::new(HashMap::new()),
            guards: Mutex::new(HashMap::new()),
        }
    }

    /// Load the first page, replacing any loaded content.
    pub async fn load_first_page(&self) -> Result<()> {
        let page = self.fetch_page(0).await?;
        self.seed_interactions(&page).await;
        *self.total.write().await = page.total;
        *self.posts.write().await = page.posts;
        Ok(())
    }

    /// Load and append a further page.
    pub async fn load_page(&self, page_index: u32) -> Result<()> {
        let page = self.fetch_page(page_index).await?;
        self.seed_interactions(&page).await;
        *self.total.write().await = page.total;
        self.posts.write().await.extend(page.posts);
        Ok(())
    }

    async fn fetch_page(&self, page_index: u32) -> Result<FeedPage> {
        let page = self
            .backend
            .get_feed_posts(page_index, self.page_size)
            .await?;
        Ok(page)
    }

    /// Record interaction state from freshly fetched rows, resolving the
    /// viewer's like edge where the row itself does not carry it.
    async fn seed_interactions(&self, page: &FeedPage) {
        let viewer = self.session.borrow().identity.clone();
        let mut interactions = self.interactions.write().await;
        for post in &page.posts {
            let mut liked = post.is_liked;
            if !liked {
                if let Some(viewer) = &viewer {
                    liked = self
                        .backend
                        .has_user_liked(post.id, viewer.id)
                        .await
                        .unwrap_or(false);
                }
            }
            interactions.insert(
                post.id,
                PostInteraction {
                    liked,
                    likes_count: post.likes_count,
                },
            );
        }
    }

    /// Loaded posts, in feed order.
    pub async fn posts(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Total approved posts across all pages, from the last fetch.
    pub async fn total(&self) -> u64 {
        *self.total.read().await
    }

    /// Interaction state for one post, if it has been loaded.
    pub async fn interaction(&self, post_id: PostId) -> Option<PostInteraction> {
        self.interactions.read().await.get(&post_id).copied()
    }

    /// Flip the viewer's like on a post, optimistically.
    ///
    /// Without an identity this is a no-op: nothing is issued and nothing
    /// changes. Otherwise the visible state flips and the count moves by
    /// one before the single matching gateway call; a failed call reverts
    /// both values and surfaces the error. No retry.
    pub async fn toggle_like(&self, post_id: PostId) -> Result<()> {
        let Some(viewer) = self.session.borrow().identity.clone() else {
            return Ok(());
        };

        let guard = self.guard_for(post_id).await;
        let _held = guard.lock().await;

        let previous = {
            let interactions = self.interactions.read().await;
            interactions.get(&post_id).copied()
        };
        let Some(previous) = previous else {
            return Err(WanderError::not_found(format!(
                "post {post_id} is not loaded in the feed"
            )));
        };

        // Optimistic flip, applied before the network call. The decrement
        // clamps at zero: a row can arrive with a zero counter but a live
        // like edge when a previous counter write failed server-side.
        let target = PostInteraction {
            liked: !previous.liked,
            likes_count: if previous.liked {
                (previous.likes_count - 1).max(0)
            } else {
                previous.likes_count + 1
            },
        };
        self.interactions.write().await.insert(post_id, target);

        // Exactly one call, matching the new target state.
        let outcome = if target.liked {
            self.backend.like_post(post_id, viewer.id).await
        } else {
            self.backend.unlike_post(post_id, viewer.id).await
        };

        if let Err(err) = outcome {
            // Roll back to the observed state; the server never applied it.
            self.interactions.write().await.insert(post_id, previous);
            error!(error = %err, %post_id, "like toggle failed, rolled back");
            return Err(err.into());
        }
        Ok(())
    }

    async fn guard_for(&self, post_id: PostId) -> Arc<async_lock::Mutex<()>> {
        let mut guards = self.guards.lock().await;
        Arc::clone(
            guards
                .entry(post_id)
                .or_insert_with(|| Arc::new(async_lock::Mutex::new(()))),
        )
    }
}
