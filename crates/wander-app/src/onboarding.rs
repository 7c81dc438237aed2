//! Onboarding workflow
//!
//! Drives the role selection and completion steps: each step writes the
//! profile row through the gateway, then refreshes the session snapshot so
//! the root-flow selector sees the new row. The selector flip to the main
//! flow happens through the published snapshot, never by direct
//! navigation.

use std::sync::Arc;
use tracing::debug;
use wander_core::{ProfilePatch, Result, Role, WanderError};
use wander_gateway::Backend;

use crate::navigation::onboarding_flow_for;
use crate::screens::OnboardingScreen;
use crate::session::SessionController;

/// The onboarding steps, bound to a session.
pub struct OnboardingFlow {
    backend: Arc<dyn Backend>,
    session: SessionController,
}

impl OnboardingFlow {
    /// Bind the workflow to a backend and the session controller whose
    /// snapshot it refreshes.
    pub fn new(backend: Arc<dyn Backend>, session: SessionController) -> Self {
        Self { backend, session }
    }

    /// Persist the selected role and return the screen to proceed to.
    ///
    /// The role write and the snapshot refresh both complete before the
    /// returned screen is pushed, so the router and the profile row never
    /// disagree about the selection.
    pub async fn select_role(&self, role: Role) -> Result<OnboardingScreen> {
        let user_id = self.current_user()?;
        self.backend
            .update_profile(user_id, ProfilePatch::new().role(role))
            .await?;
        self.session.refresh_profile().await?;
        debug!(%role, "role selected");
        Ok(onboarding_flow_for(role))
    }

    /// Mark onboarding finished.
    ///
    /// The refreshed snapshot flips the root-flow selector to the main
    /// flow; no explicit navigation call is involved.
    pub async fn complete_onboarding(&self) -> Result<()> {
        let user_id = self.current_user()?;
        self.backend
            .update_profile(user_id, ProfilePatch::new().onboarding_completed(true))
            .await?;
        self.session.refresh_profile().await?;
        debug!("onboarding completed");
        Ok(())
    }

    fn current_user(&self) -> Result<wander_core::UserId> {
        self.session
            .snapshot()
            .identity
            .map(|identity| identity.id)
            .ok_or_else(|| WanderError::permission_denied("onboarding requires a signed-in user"))
    }
}
