//! End-to-end session lifecycle over the in-memory backend: cold start,
//! restore, sign-in/out via the auth-change subscription, degradation on
//! profile fetch failure, and the onboarding completion flip.

use assert_matches::assert_matches;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, Notify, Semaphore};
use tokio::time::timeout;
use wander_app::{
    select_root_flow, OnboardingFlow, OnboardingScreen, RootFlow, SessionController, SessionPhase,
    SessionSnapshot,
};
use wander_core::{
    Comment, FeedPage, NewComment, NewPost, Post, PostId, Profile, ProfilePatch, Role, Session,
    SignUpForm, UserId, WanderError,
};
use wander_gateway::{
    AuthChange, AuthGateway, Fault, GatewayError, MemoryBackend, PostGateway, ProfileGateway,
    SignInRequest, SignUpRequest,
};

fn sign_up_form(email: &str) -> SignUpForm {
    SignUpForm {
        email: email.to_string(),
        password: "Passw0rd".to_string(),
        full_name: "Test User".to_string(),
        username: Some("test_user".to_string()),
    }
}

async fn wait_for_phase(
    rx: &mut watch::Receiver<SessionSnapshot>,
    phase: SessionPhase,
) -> SessionSnapshot {
    timeout(Duration::from_secs(1), async {
        loop {
            let snapshot = rx.borrow().clone();
            if snapshot.phase() == phase {
                return snapshot;
            }
            rx.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {phase:?}"))
}

#[tokio::test]
async fn test_cold_start_without_session_settles_unauthenticated() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend);

    assert_eq!(controller.snapshot().phase(), SessionPhase::Initializing);
    controller.start().await;

    // start() awaited the restore; loading is already over
    let snapshot = controller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.phase(), SessionPhase::Unauthenticated);
    assert_eq!(select_root_flow(&snapshot), RootFlow::Auth);
}

#[tokio::test]
async fn test_restore_existing_session_loads_profile() {
    let backend = Arc::new(MemoryBackend::new());
    backend.sign_up(SignUpRequest {
        email: "a@example.com".to_string(),
        password: "Passw0rd".to_string(),
        full_name: "Test User".to_string(),
        username: None,
    })
    .await
    .unwrap();

    // A fresh controller over the same backend sees the persisted blob
    let controller = SessionController::new(backend);
    controller.start().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase(), SessionPhase::AuthenticatedWithProfile);
    assert_eq!(
        snapshot.identity.as_ref().map(|i| i.email.as_str()),
        Some("a@example.com")
    );
}

#[tokio::test]
async fn test_profile_fetch_failure_degrades_not_hangs() {
    let backend = Arc::new(MemoryBackend::new());
    backend.sign_up(SignUpRequest {
        email: "a@example.com".to_string(),
        password: "Passw0rd".to_string(),
        full_name: "Test User".to_string(),
        username: None,
    })
    .await
    .unwrap();
    backend.fail_next(Fault::ProfileFetch).await;

    let controller = SessionController::new(backend);
    controller.start().await;

    // Authenticated, profile unavailable, loading over: never stuck
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase(), SessionPhase::AuthenticatedNoProfile);
    assert_eq!(select_root_flow(&snapshot), RootFlow::Onboarding);

    // The row is recoverable on demand
    controller.refresh_profile().await.unwrap();
    assert_eq!(
        controller.snapshot().phase(),
        SessionPhase::AuthenticatedWithProfile
    );
}

#[tokio::test]
async fn test_sign_in_arrives_through_subscription() {
    let backend = Arc::new(MemoryBackend::new());
    backend.sign_up(SignUpRequest {
        email: "a@example.com".to_string(),
        password: "Passw0rd".to_string(),
        full_name: "Test User".to_string(),
        username: None,
    })
    .await
    .unwrap();
    backend.sign_out().await.unwrap();

    let controller = SessionController::new(backend);
    let mut rx = controller.subscribe();
    controller.start().await;
    assert_eq!(controller.snapshot().phase(), SessionPhase::Unauthenticated);

    controller.sign_in("a@example.com", "Passw0rd").await.unwrap();
    let snapshot = wait_for_phase(&mut rx, SessionPhase::AuthenticatedWithProfile).await;
    assert!(snapshot.profile.is_some());
}

#[tokio::test]
async fn test_sign_in_bad_credentials_surface() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend);
    controller.start().await;

    let err = controller.sign_in("ghost@example.com", "nope").await.unwrap_err();
    assert_matches!(err, WanderError::PermissionDenied { .. });
    assert_eq!(controller.snapshot().phase(), SessionPhase::Unauthenticated);
}

#[tokio::test]
async fn test_invalid_sign_up_form_never_reaches_backend() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend.clone());
    controller.start().await;

    let mut form = sign_up_form("not-an-email");
    form.password = "short".to_string();
    let err = controller.sign_up(form).await.unwrap_err();
    assert_matches!(err, WanderError::Invalid { .. });

    // No session was established anywhere
    assert!(backend.restore_session().await.unwrap().is_none());
    assert_eq!(controller.snapshot().phase(), SessionPhase::Unauthenticated);
}

#[tokio::test]
async fn test_sign_up_then_sign_out_clears_profile() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend);
    let mut rx = controller.subscribe();
    controller.start().await;

    controller.sign_up(sign_up_form("a@example.com")).await.unwrap();
    wait_for_phase(&mut rx, SessionPhase::AuthenticatedWithProfile).await;

    controller.sign_out().await.unwrap();
    let snapshot = wait_for_phase(&mut rx, SessionPhase::Unauthenticated).await;
    assert!(snapshot.identity.is_none());
    assert!(snapshot.profile.is_none());
}

#[tokio::test]
async fn test_onboarding_completion_flips_selector_to_main() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend.clone());
    let mut rx = controller.subscribe();
    controller.start().await;

    controller.sign_up(sign_up_form("a@example.com")).await.unwrap();
    let snapshot = wait_for_phase(&mut rx, SessionPhase::AuthenticatedWithProfile).await;
    assert_eq!(select_root_flow(&snapshot), RootFlow::Onboarding);

    let onboarding = OnboardingFlow::new(backend, controller.clone());
    let next = onboarding.select_role(Role::Creator).await.unwrap();
    assert_eq!(next, OnboardingScreen::CreatorOnboarding);
    // Role is persisted but onboarding is still open
    assert_eq!(
        select_root_flow(&controller.snapshot()),
        RootFlow::Onboarding
    );

    onboarding.complete_onboarding().await.unwrap();
    assert_eq!(select_root_flow(&controller.snapshot()), RootFlow::Main);
}

#[tokio::test]
async fn test_onboarding_requires_identity() {
    let backend = Arc::new(MemoryBackend::new());
    let controller = SessionController::new(backend.clone());
    controller.start().await;

    let onboarding = OnboardingFlow::new(backend, controller);
    let err = onboarding.select_role(Role::Host).await.unwrap_err();
    assert_matches!(err, WanderError::PermissionDenied { .. });
}

/// Delegating backend whose next `get_profile` can be held open, so a
/// test can apply a sign-out while a profile fetch is in flight.
struct GatedProfileBackend {
    inner: MemoryBackend,
    gated: AtomicBool,
    entered: Notify,
    release: Semaphore,
}

impl GatedProfileBackend {
    fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            gated: AtomicBool::new(false),
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Park the next `get_profile` call until `release` gains a permit.
    fn hold_next_profile_fetch(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthGateway for GatedProfileBackend {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Session, GatewayError> {
        self.inner.sign_up(request).await
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Session, GatewayError> {
        self.inner.sign_in(request).await
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        self.inner.sign_out().await
    }

    async fn restore_session(&self) -> Result<Option<Session>, GatewayError> {
        self.inner.restore_session().await
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<AuthChange>, GatewayError> {
        self.inner.subscribe()
    }

    async fn reset_password(&self, email: &str) -> Result<(), GatewayError> {
        self.inner.reset_password(email).await
    }

    async fn update_password(&self, new_password: &str) -> Result<(), GatewayError> {
        self.inner.update_password(new_password).await
    }
}

#[async_trait]
impl ProfileGateway for GatedProfileBackend {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError> {
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            let permit = self
                .release
                .acquire()
                .await
                .map_err(|_| GatewayError::backend("gate closed"))?;
            permit.forget();
        }
        self.inner.get_profile(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<Profile, GatewayError> {
        self.inner.update_profile(user_id, patch).await
    }
}

#[async_trait]
impl PostGateway for GatedProfileBackend {
    async fn get_feed_posts(&self, page: u32, page_size: u32) -> Result<FeedPage, GatewayError> {
        self.inner.get_feed_posts(page, page_size).await
    }

    async fn get_post(&self, post_id: PostId) -> Result<Post, GatewayError> {
        self.inner.get_post(post_id).await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, GatewayError> {
        self.inner.create_post(post).await
    }

    async fn like_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError> {
        self.inner.like_post(post_id, user_id).await
    }

    async fn unlike_post(&self, post_id: PostId, user_id: UserId) -> Result<(), GatewayError> {
        self.inner.unlike_post(post_id, user_id).await
    }

    async fn has_user_liked(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<bool, GatewayError> {
        self.inner.has_user_liked(post_id, user_id).await
    }

    async fn get_comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError> {
        self.inner.get_comments(post_id).await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, GatewayError> {
        self.inner.create_comment(comment).await
    }
}

#[tokio::test]
async fn test_stale_profile_fetch_is_discarded_after_sign_out() {
    let backend = Arc::new(GatedProfileBackend::new(MemoryBackend::new()));
    backend
        .sign_up(SignUpRequest {
            email: "a@example.com".to_string(),
            password: "Passw0rd".to_string(),
            full_name: "Test User".to_string(),
            username: None,
        })
        .await
        .unwrap();

    let controller = SessionController::new(backend.clone());
    let mut rx = controller.subscribe();
    controller.start().await;
    assert_eq!(
        controller.snapshot().phase(),
        SessionPhase::AuthenticatedWithProfile
    );

    // Park a refresh inside the backend call
    backend.hold_next_profile_fetch();
    let refresh = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.refresh_profile().await })
    };
    timeout(Duration::from_secs(1), backend.entered.notified())
        .await
        .expect("refresh never reached the backend");

    // Sign out while the fetch is in flight, then let it complete
    backend.sign_out().await.unwrap();
    wait_for_phase(&mut rx, SessionPhase::Unauthenticated).await;
    backend.release.add_permits(1);
    refresh.await.unwrap().unwrap();

    // The late result never reattaches a profile to the ended session
    let snapshot = controller.snapshot();
    assert!(snapshot.identity.is_none());
    assert!(snapshot.profile.is_none());
}
