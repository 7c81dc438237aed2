//! Wander App - Headless Application Layer
//!
//! The portable core of the client: everything below the rendering layer.
//! Hosts (mobile shells, a TUI, tests) inject a backend implementation and
//! subscribe to published state.
//!
//! # Architecture
//!
//! - [`SessionController`] owns the authentication lifecycle and publishes
//!   [`SessionSnapshot`] over a watch channel
//! - [`select_root_flow`] derives the root flow purely from the latest
//!   snapshot; [`Navigator`] owns mounted per-flow stack history
//! - [`FeedView`] renders feed pages and runs the optimistic like
//!   protocol with per-post serialization
//! - [`OnboardingFlow`] writes role selection and completion through the
//!   profile row, then refreshes the snapshot
//! - [`LocaleStore`] / [`Translator`] and [`Theme`] cover language and
//!   appearance
//!
//! State flows one way: backend events update the session snapshot, the
//! snapshot drives flow selection, screens issue operations back through
//! the gateway. Navigation never writes session state.

pub mod feed;
pub mod locale;
pub mod navigation;
pub mod onboarding;
pub mod screens;
pub mod session;
pub mod theme;

pub use feed::{FeedView, PostInteraction};
pub use locale::{
    KeyValueStore, Language, LanguageParseError, LocaleStore, MemoryKeyValueStore, Translator,
    LOCALE_KEY,
};
pub use navigation::{onboarding_flow_for, select_root_flow, MainState, Navigator, RootFlow};
pub use onboarding::OnboardingFlow;
pub use screens::{
    AuthScreen, ExploreScreen, HomeScreen, MainTab, Modal, OnboardingScreen, ProfileScreen,
    ReportedContent,
};
pub use session::{SessionController, SessionPhase, SessionSnapshot};
pub use theme::{ColorTokens, RadiusTokens, SpacingTokens, Theme, TypographyTokens};
