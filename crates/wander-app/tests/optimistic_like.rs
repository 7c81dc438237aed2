//! Optimistic like/unlike protocol and feed pagination over the
//! in-memory backend.

use assert_matches::assert_matches;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use wander_app::{FeedView, SessionController, SessionPhase};
use wander_core::{
    ApprovalStatus, PaginationConfig, Post, PostId, PostType, UserId, Visibility, WanderError,
};
use wander_gateway::{AuthGateway, Fault, MemoryBackend, PostGateway, SignUpRequest};

fn approved_post(author_id: UserId, content: &str, created_at: OffsetDateTime) -> Post {
    Post {
        id: PostId::new_v4(),
        author_id,
        content: content.to_string(),
        media: Vec::new(),
        post_type: PostType::Standard,
        property_id: None,
        collaboration_id: None,
        likes_count: 0,
        comments_count: 0,
        reposts_count: 0,
        views_count: 0,
        approval_status: ApprovalStatus::Approved,
        is_pinned: false,
        visibility: Visibility::Public,
        created_at,
        updated_at: created_at,
        author: None,
        is_liked: false,
        is_reposted: false,
        is_bookmarked: false,
    }
}

/// Backend with one signed-in user, plus a started controller.
async fn signed_in_backend() -> (Arc<MemoryBackend>, SessionController, UserId) {
    let backend = Arc::new(MemoryBackend::new());
    let session = backend
        .sign_up(SignUpRequest {
            email: "viewer@example.com".to_string(),
            password: "Passw0rd".to_string(),
            full_name: "Viewer".to_string(),
            username: None,
        })
        .await
        .unwrap();
    let user_id = session.user_id();

    let controller = SessionController::new(backend.clone());
    controller.start().await;
    assert_eq!(
        controller.snapshot().phase(),
        SessionPhase::AuthenticatedWithProfile
    );
    (backend, controller, user_id)
}

fn feed(backend: &Arc<MemoryBackend>, controller: &SessionController) -> FeedView {
    FeedView::new(
        backend.clone(),
        controller.subscribe(),
        &PaginationConfig::default(),
    )
}

#[tokio::test]
async fn test_like_success_increments_and_marks_liked() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let mut post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    post.likes_count = 5;
    let post_id = post.id;
    backend.insert_post(post).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    feed.toggle_like(post_id).await.unwrap();
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(interaction.liked);
    assert_eq!(interaction.likes_count, 6);

    // Server state agrees
    assert!(backend.has_like_edge(post_id, user_id).await);
    assert_eq!(backend.post_row(post_id).await.unwrap().likes_count, 6);
}

#[tokio::test]
async fn test_like_failure_reverts_both_values() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let mut post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    post.likes_count = 5;
    let post_id = post.id;
    backend.insert_post(post).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    backend.fail_next(Fault::LikeEdge).await;
    let err = feed.toggle_like(post_id).await.unwrap_err();
    assert_matches!(err, WanderError::Network { .. });

    // Rolled back to the observed state; nothing reached the server
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(!interaction.liked);
    assert_eq!(interaction.likes_count, 5);
    assert!(!backend.has_like_edge(post_id, user_id).await);
}

#[tokio::test]
async fn test_counter_failure_reverts_client_even_with_edge_behind() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    let post_id = post.id;
    backend.insert_post(post).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    backend.fail_next(Fault::LikeCounter).await;
    assert!(feed.toggle_like(post_id).await.is_err());

    // Client rolled back; the server kept the edge with a stale counter.
    // That divergence is the backend's known non-atomicity, not ours.
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(!interaction.liked);
    assert_eq!(interaction.likes_count, 0);
    assert!(backend.has_like_edge(post_id, user_id).await);
}

#[tokio::test]
async fn test_unlike_is_symmetric() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let mut post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    post.likes_count = 3;
    let post_id = post.id;
    backend.insert_post(post).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    feed.toggle_like(post_id).await.unwrap();
    feed.toggle_like(post_id).await.unwrap();

    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(!interaction.liked);
    assert_eq!(interaction.likes_count, 3);
    assert!(!backend.has_like_edge(post_id, user_id).await);
}

#[tokio::test]
async fn test_unlike_failure_restores_liked_state() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let mut post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    post.likes_count = 3;
    let post_id = post.id;
    backend.insert_post(post).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();
    feed.toggle_like(post_id).await.unwrap();

    backend.fail_next(Fault::UnlikeEdge).await;
    assert!(feed.toggle_like(post_id).await.is_err());

    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(interaction.liked);
    assert_eq!(interaction.likes_count, 4);
}

#[tokio::test]
async fn test_toggle_without_identity_is_a_no_op() {
    let backend = Arc::new(MemoryBackend::new());
    let author = UserId::new_v4();
    // Seed a post but never sign anyone in
    let mut post = approved_post(author, "hello", OffsetDateTime::now_utc());
    post.likes_count = 5;
    let post_id = post.id;
    backend.insert_post(post).await;

    let controller = SessionController::new(backend.clone());
    controller.start().await;
    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    // Ok, but nothing happened anywhere
    feed.toggle_like(post_id).await.unwrap();
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(!interaction.liked);
    assert_eq!(interaction.likes_count, 5);
    assert!(!backend.has_like_edge(post_id, author).await);
}

#[tokio::test]
async fn test_toggle_unloaded_post_is_an_error() {
    let (backend, controller, _) = signed_in_backend().await;
    let feed = feed(&backend, &controller);

    let err = feed.toggle_like(PostId::new_v4()).await.unwrap_err();
    assert_matches!(err, WanderError::NotFound { .. });
}

#[tokio::test]
async fn test_pagination_filters_pending_and_orders_newest_first() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let base = OffsetDateTime::now_utc();

    for i in 0..25 {
        backend
            .insert_post(approved_post(
                user_id,
                &format!("approved {i}"),
                base + Duration::seconds(i),
            ))
            .await;
    }
    for i in 0..3 {
        let mut post = approved_post(user_id, &format!("pending {i}"), base + Duration::hours(1));
        post.approval_status = ApprovalStatus::Pending;
        backend.insert_post(post).await;
    }

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    // Exactly one default page of approved posts, newest first
    let posts = feed.posts().await;
    assert_eq!(posts.len(), 20);
    assert_eq!(feed.total().await, 25);
    assert_eq!(posts[0].content, "approved 24");
    assert_eq!(posts[19].content, "approved 5");
    assert!(posts.iter().all(|p| p.approval_status == ApprovalStatus::Approved));

    feed.load_page(1).await.unwrap();
    let posts = feed.posts().await;
    assert_eq!(posts.len(), 25);
    assert_eq!(posts[24].content, "approved 0");
}

#[tokio::test]
async fn test_feed_load_failure_surfaces() {
    let (backend, controller, _) = signed_in_backend().await;
    backend.fail_next(Fault::FeedQuery).await;

    let feed = feed(&backend, &controller);
    let err = feed.load_first_page().await.unwrap_err();
    assert_matches!(err, WanderError::Network { .. });
    assert!(feed.posts().await.is_empty());
}

#[tokio::test]
async fn test_unlike_with_stale_zero_counter_clamps_at_zero() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    let post_id = post.id;
    backend.insert_post(post).await;

    // Leave a like edge behind a failed counter write: the row reloads
    // with a zero counter but a live edge.
    backend.fail_next(Fault::LikeCounter).await;
    let _ = backend.like_post(post_id, user_id).await;

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(interaction.liked);
    assert_eq!(interaction.likes_count, 0);

    // Unliking that state never publishes a negative count
    feed.toggle_like(post_id).await.unwrap();
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(!interaction.liked);
    assert_eq!(interaction.likes_count, 0);
    assert!(!backend.has_like_edge(post_id, user_id).await);
}

#[tokio::test]
async fn test_loaded_feed_reflects_existing_like_edges() {
    let (backend, controller, user_id) = signed_in_backend().await;
    let mut post = approved_post(user_id, "hello", OffsetDateTime::now_utc());
    post.likes_count = 1;
    let post_id = post.id;
    backend.insert_post(post).await;
    backend.like_post(post_id, user_id).await.unwrap();

    let feed = feed(&backend, &controller);
    feed.load_first_page().await.unwrap();

    // The edge written before the load shows up as liked
    let interaction = feed.interaction(post_id).await.unwrap();
    assert!(interaction.liked);
    assert_eq!(interaction.likes_count, 2);
}
