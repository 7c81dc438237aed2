//! Navigation router
//!
//! Flow selection is a pure function of the latest session snapshot; the
//! [`Navigator`] owns the mounted flow and its per-flow stack history.
//! When the selector output changes, the previous flow's subtree is torn
//! down entirely (stacks cleared, modals dismissed) and the new flow
//! mounts at its initial screen. Navigation never writes session state.

use crate::screens::{
    AuthScreen, ExploreScreen, HomeScreen, MainTab, Modal, OnboardingScreen, ProfileScreen,
};
use crate::session::SessionSnapshot;
use tracing::debug;
use wander_core::{Role, WanderError};

/// The four mutually exclusive root flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFlow {
    /// Session restore in progress; splash
    Loading,
    /// Signed out
    Auth,
    /// Signed in, onboarding not finished
    Onboarding,
    /// Signed in and onboarded
    Main,
}

/// Select the root flow from a session snapshot.
///
/// Pure: the result depends only on the `(loading, identity, profile)`
/// triple, never on navigation history. An authenticated user whose
/// profile row is missing is routed to onboarding, the recoverable path.
pub fn select_root_flow(snapshot: &SessionSnapshot) -> RootFlow {
    if snapshot.loading {
        return RootFlow::Loading;
    }
    if snapshot.identity.is_none() {
        return RootFlow::Auth;
    }
    match &snapshot.profile {
        Some(profile) if profile.onboarding_completed => RootFlow::Main,
        _ => RootFlow::Onboarding,
    }
}

/// The onboarding screen a role proceeds to after selection.
///
/// Total over the closed role enum. `Manager` accounts are provisioned
/// out of band and have no questionnaire; they take the generic welcome
/// completion path.
pub fn onboarding_flow_for(role: Role) -> OnboardingScreen {
    match role {
        Role::Host => OnboardingScreen::HostOnboarding,
        Role::Creator => OnboardingScreen::CreatorOnboarding,
        Role::Jolly => OnboardingScreen::JollyOnboarding,
        Role::Manager => OnboardingScreen::Welcome,
    }
}

/// Pop unless only the initial screen remains.
fn pop_above_root<T>(stack: &mut Vec<T>) {
    if stack.len() > 1 {
        stack.pop();
    }
}

/// Mounted state of the main flow: the active tab plus one stack per
/// stack-bearing tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainState {
    /// Currently selected bottom tab
    pub active_tab: MainTab,
    /// Home tab history, bottom first; never empty
    pub home_stack: Vec<HomeScreen>,
    /// Explore tab history, bottom first; never empty
    pub explore_stack: Vec<ExploreScreen>,
    /// Profile tab history, bottom first; never empty
    pub profile_stack: Vec<ProfileScreen>,
}

impl MainState {
    fn mounted() -> Self {
        Self {
            active_tab: MainTab::Home,
            home_stack: vec![HomeScreen::Feed],
            explore_stack: vec![ExploreScreen::Search],
            profile_stack: vec![ProfileScreen::Overview],
        }
    }
}

/// Owns the mounted flow, its stack history, and presented modals.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    flow: RootFlow,
    auth_stack: Vec<AuthScreen>,
    onboarding_stack: Vec<OnboardingScreen>,
    main: Option<MainState>,
    modals: Vec<Modal>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// A navigator showing the loading flow.
    pub fn new() -> Self {
        Self {
            flow: RootFlow::Loading,
            auth_stack: Vec::new(),
            onboarding_stack: Vec::new(),
            main: None,
            modals: Vec::new(),
        }
    }

    /// The mounted flow.
    pub fn flow(&self) -> RootFlow {
        self.flow
    }

    /// Re-run the selector against a new snapshot.
    ///
    /// A changed result tears down the previous subtree, including any
    /// presented modals, and mounts the new flow at its initial screen.
    /// An unchanged result leaves all history in place.
    pub fn apply(&mut self, snapshot: &SessionSnapshot) {
        let next = select_root_flow(snapshot);
        if next == self.flow {
            return;
        }
        debug!(from = ?self.flow, to = ?next, "root flow change");
        self.teardown();
        self.flow = next;
        match next {
            RootFlow::Loading => {}
            RootFlow::Auth => self.auth_stack.push(AuthScreen::SignIn),
            RootFlow::Onboarding => self.onboarding_stack.push(OnboardingScreen::Welcome),
            RootFlow::Main => self.main = Some(MainState::mounted()),
        }
    }

    fn teardown(&mut self) {
        self.auth_stack.clear();
        self.onboarding_stack.clear();
        self.main = None;
        self.modals.clear();
    }

    // =========================================================================
    // Auth flow
    // =========================================================================

    /// Push a screen onto the auth stack. Ignored outside the auth flow.
    pub fn push_auth(&mut self, screen: AuthScreen) {
        if self.flow == RootFlow::Auth {
            self.auth_stack.push(screen);
        }
    }

    /// Current top of the auth stack.
    pub fn current_auth(&self) -> Option<&AuthScreen> {
        self.auth_stack.last()
    }

    // =========================================================================
    // Onboarding flow
    // =========================================================================

    /// Push a screen onto the onboarding stack. Ignored outside the flow.
    pub fn push_onboarding(&mut self, screen: OnboardingScreen) {
        if self.flow == RootFlow::Onboarding {
            self.onboarding_stack.push(screen);
        }
    }

    /// Current top of the onboarding stack.
    pub fn current_onboarding(&self) -> Option<OnboardingScreen> {
        self.onboarding_stack.last().copied()
    }

    // =========================================================================
    // Main flow
    // =========================================================================

    /// Switch the active bottom tab. Ignored outside the main flow. Tab
    /// stacks keep their history across switches.
    pub fn select_tab(&mut self, tab: MainTab) {
        if let Some(main) = &mut self.main {
            main.active_tab = tab;
        }
    }

    /// Push onto the Home stack.
    pub fn push_home(&mut self, screen: HomeScreen) {
        if let Some(main) = &mut self.main {
            main.home_stack.push(screen);
        }
    }

    /// Push onto the Explore stack.
    pub fn push_explore(&mut self, screen: ExploreScreen) {
        if let Some(main) = &mut self.main {
            main.explore_stack.push(screen);
        }
    }

    /// Push onto the Profile stack.
    pub fn push_profile(&mut self, screen: ProfileScreen) {
        if let Some(main) = &mut self.main {
            main.profile_stack.push(screen);
        }
    }

    /// Pop the active tab's stack. The initial screen is never popped.
    pub fn pop(&mut self) {
        match self.flow {
            RootFlow::Auth => pop_above_root(&mut self.auth_stack),
            RootFlow::Onboarding => pop_above_root(&mut self.onboarding_stack),
            RootFlow::Main => {
                if let Some(main) = &mut self.main {
                    match main.active_tab {
                        MainTab::Home => pop_above_root(&mut main.home_stack),
                        MainTab::Explore => pop_above_root(&mut main.explore_stack),
                        MainTab::Profile => pop_above_root(&mut main.profile_stack),
                        // Create and Kolbed are single screens
                        MainTab::Create | MainTab::Kolbed => {}
                    }
                }
            }
            RootFlow::Loading => {}
        }
    }

    /// The mounted main-flow state, when the main flow is active.
    pub fn main(&self) -> Option<&MainState> {
        self.main.as_ref()
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// Present a modal above the main flow.
    ///
    /// Modals exist only above `Main`; other flows reject presentation.
    pub fn present_modal(&mut self, modal: Modal) -> Result<(), WanderError> {
        if self.flow != RootFlow::Main {
            return Err(WanderError::invalid(
                "modals can only be presented over the main flow",
            ));
        }
        self.modals.push(modal);
        Ok(())
    }

    /// Dismiss the topmost modal, if any.
    pub fn dismiss_modal(&mut self) -> Option<Modal> {
        self.modals.pop()
    }

    /// Presented modals, bottom first.
    pub fn modals(&self) -> &[Modal] {
        &self.modals
    }
}
