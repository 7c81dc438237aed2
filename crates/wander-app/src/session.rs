//! Session controller
//!
//! Owns the authentication lifecycle: restore the persisted session at
//! start, consume auth-change notifications, keep the profile row in sync
//! with the identity, and publish a single derived snapshot that the rest
//! of the application (navigation included) reads.
//!
//! # Architecture
//!
//! The controller is constructed with an injected backend handle; there
//! are no ambient singletons. State flows one way:
//!
//! ```text
//! restore_session / auth changes --> apply_session --> watch channel
//! ```
//!
//! A single task consumes the auth-change subscription and awaits the
//! profile fetch inline before touching the next event, so two in-flight
//! notifications can never publish out of order.
//!
//! Failure policy at this layer: restore and profile-fetch errors degrade
//! (warn, settle in a reachable state) rather than propagate; operation
//! errors (`sign_in`, `sign_up`, ...) surface to the initiating caller.
//! Loading ends in every branch.

use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, warn};
use wander_core::{Identity, Profile, Result, Session, SignUpForm, SignUpFormErrors, WanderError};
use wander_gateway::{Backend, SignInRequest, SignUpRequest};

/// Discrete session states, derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Restoring the persisted session; nothing is known yet
    Initializing,
    /// No session
    Unauthenticated,
    /// Session established but no profile row is available
    AuthenticatedNoProfile,
    /// Session established and the profile row is loaded
    AuthenticatedWithProfile,
}

/// The single readiness signal consumers subscribe to.
///
/// `loading` is true only during the initial restore. Once it drops to
/// false it never rises again for the lifetime of the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Initial restore still in flight
    pub loading: bool,
    /// The authenticated principal, if any
    pub identity: Option<Identity>,
    /// The principal's profile row, when loaded
    pub profile: Option<Profile>,
}

impl SessionSnapshot {
    /// Snapshot published before `start` resolves anything.
    pub fn initializing() -> Self {
        Self {
            loading: true,
            identity: None,
            profile: None,
        }
    }

    /// Derive the discrete phase.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.identity.is_none() {
            SessionPhase::Unauthenticated
        } else if self.profile.is_none() {
            SessionPhase::AuthenticatedNoProfile
        } else {
            SessionPhase::AuthenticatedWithProfile
        }
    }
}

struct ControllerInner {
    backend: Arc<dyn Backend>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    /// The held credential bundle. Replaced only by `apply_session`.
    session: Mutex<Option<Session>>,
}

impl ControllerInner {
    /// Replace the held session and republish the derived snapshot.
    ///
    /// The profile fetch is awaited here, inside the caller's turn, which
    /// is what serializes event handling: the consumer task does not read
    /// the next notification until this returns.
    async fn apply_session(&self, session: Option<Session>) {
        let profile = match &session {
            Some(session) => match self.backend.get_profile(session.user_id()).await {
                Ok(profile) => profile,
                Err(err) => {
                    // Degrade to authenticated-without-profile; the row can
                    // be re-fetched on demand later.
                    warn!(error = %err, "profile fetch failed");
                    None
                }
            },
            None => None,
        };
        let identity = session.as_ref().map(|s| s.identity.clone());

        {
            let mut held = self.session.lock().await;
            *held = session;
        }
        self.publish(identity, profile);
    }

    fn publish(&self, identity: Option<Identity>, profile: Option<Profile>) {
        let snapshot = SessionSnapshot {
            loading: false,
            identity,
            profile,
        };
        debug!(phase = ?snapshot.phase(), "session transition");
        self.snapshot_tx.send_replace(snapshot);
    }
}

/// The authentication lifecycle owner.
///
/// Cheap to clone; all clones share state. Call [`start`](Self::start)
/// once, then read state through [`subscribe`](Self::subscribe).
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

impl SessionController {
    /// Create a controller over an injected backend.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::initializing());
        Self {
            inner: Arc::new(ControllerInner {
                backend,
                snapshot_tx,
                session: Mutex::new(None),
            }),
        }
    }

    /// Observe session snapshots. The receiver always holds the latest
    /// value; intermediate states may be skipped under load.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Restore the persisted session and begin consuming auth changes.
    ///
    /// Every branch ends the loading state: restored session (with or
    /// without a profile row), no session, restore error, or subscription
    /// setup failure. The controller never stays in `Initializing` past
    /// this call plus one scheduling tick.
    pub async fn start(&self) {
        let mut events = match self.inner.backend.subscribe() {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "auth subscription unavailable, settling unauthenticated");
                self.inner.publish(None, None);
                return;
            }
        };

        let restored = match self.inner.backend.restore_session().await {
            Ok(session) => session,
            Err(err) => {
                // A failed restore is indistinguishable from no session.
                warn!(error = %err, "session restore failed, treating as signed out");
                None
            }
        };
        self.inner.apply_session(restored).await;

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(change) => {
                        debug!(kind = ?change.kind, "auth change received");
                        inner.apply_session(change.session).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "auth change stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Establish a session from credentials.
    ///
    /// On success the state change arrives through the subscription, not
    /// through this return value.
    pub async fn sign_in(&self, email: impl Into<String>, password: impl Into<String>) -> Result<()> {
        self.inner
            .backend
            .sign_in(SignInRequest {
                email: email.into(),
                password: password.into(),
            })
            .await?;
        Ok(())
    }

    /// Validate the form locally, then create the account.
    ///
    /// An invalid form fails before any network call is issued.
    pub async fn sign_up(&self, form: SignUpForm) -> Result<()> {
        if let Err(errors) = form.validate() {
            return Err(WanderError::invalid(form_error_message(&errors)));
        }
        self.inner
            .backend
            .sign_up(SignUpRequest {
                email: form.email,
                password: form.password,
                full_name: form.full_name,
                username: form.username,
            })
            .await?;
        Ok(())
    }

    /// End the session.
    ///
    /// The local profile is cleared unconditionally, even though the
    /// identity itself is removed by the sign-out notification.
    pub async fn sign_out(&self) -> Result<()> {
        self.inner.backend.sign_out().await?;
        // Mutate in place under the channel lock; a snapshot published
        // concurrently by the event consumer is never overwritten with a
        // stale clone taken before the backend call.
        self.inner
            .snapshot_tx
            .send_modify(|snapshot| snapshot.profile = None);
        Ok(())
    }

    /// Re-fetch the profile row for the current identity.
    ///
    /// No-op without an identity. Used after onboarding mutations so the
    /// published snapshot reflects the new row.
    pub async fn refresh_profile(&self) -> Result<()> {
        let identity = self.inner.snapshot_tx.borrow().identity.clone();
        let Some(identity) = identity else {
            return Ok(());
        };
        let profile = self.inner.backend.get_profile(identity.id).await?;
        // The fetch raced the event consumer: a sign-out or a different
        // sign-in may have been applied while it was in flight. The result
        // is only published for the identity it was issued for; otherwise
        // it is discarded, keeping "profile cleared when the session ends".
        let published = self.inner.snapshot_tx.send_if_modified(|snapshot| {
            if snapshot.identity.as_ref() == Some(&identity) {
                snapshot.profile = profile;
                true
            } else {
                false
            }
        });
        if !published {
            debug!(user_id = %identity.id, "identity changed during profile refresh, discarding");
        }
        Ok(())
    }
}

/// Flatten per-field failures into one user-facing message.
fn form_error_message(errors: &SignUpFormErrors) -> String {
    let mut parts = Vec::new();
    if let Some(err) = errors.email {
        parts.push(err.to_string());
    }
    if let Some(err) = errors.password {
        parts.push(err.to_string());
    }
    if let Some(err) = errors.username {
        parts.push(err.to_string());
    }
    if errors.full_name_required {
        parts.push("Full name is required".to_string());
    }
    parts.join("; ")
}
