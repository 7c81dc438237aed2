//! Screen graph
//!
//! Typed destinations for every navigable screen, with required params as
//! enum fields. A screen that needs a post id cannot be constructed
//! without one; there is no stringly-typed route table.

use uuid::Uuid;
use wander_core::{PostId, PropertyId, UserId};

/// Screens reachable while signed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScreen {
    /// Credential entry; the auth flow's initial screen
    SignIn,
    /// Account creation form
    SignUp,
    /// Request a password-reset link
    ForgotPassword,
    /// Post-sign-up prompt to verify the given address
    VerifyEmail {
        /// Address the verification mail was sent to
        email: String,
    },
    /// Set a new password from a reset link
    ResetPassword {
        /// Token carried by the reset link
        token: String,
    },
}

/// Screens of the onboarding flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingScreen {
    /// Landing screen; also the completion path for roles without a
    /// dedicated questionnaire
    Welcome,
    /// Pick a marketplace role
    RoleSelection,
    /// Host questionnaire
    HostOnboarding,
    /// Creator questionnaire
    CreatorOnboarding,
    /// Service-provider questionnaire
    JollyOnboarding,
}

/// Bottom tabs of the main flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    /// Feed
    Home,
    /// Search and discovery
    Explore,
    /// Post composer entry point
    Create,
    /// Collaborations
    Kolbed,
    /// Own profile
    Profile,
}

/// Screens stacked on the Home tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeScreen {
    /// The feed list; initial screen of the stack
    Feed,
    /// A single post
    PostDetail {
        /// Post to show
        post_id: PostId,
    },
    /// Another user's profile
    UserProfile {
        /// Profile owner
        user_id: UserId,
    },
    /// A property listing
    PropertyDetail {
        /// Listing to show
        property_id: PropertyId,
    },
    /// Comment thread of a post
    Comments {
        /// Post whose comments are shown
        post_id: PostId,
    },
}

/// Screens stacked on the Explore tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreScreen {
    /// Search entry; initial screen of the stack
    Search,
    /// A property listing opened from results
    PropertyDetail {
        /// Listing to show
        property_id: PropertyId,
    },
    /// A user profile opened from results
    UserProfile {
        /// Profile owner
        user_id: UserId,
    },
}

/// Screens stacked on the Profile tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileScreen {
    /// Own profile; initial screen of the stack
    Overview,
    /// Edit the profile row
    EditProfile,
    /// App settings
    Settings,
    /// Another user's profile opened from followers/following
    UserProfile {
        /// Profile owner
        user_id: UserId,
    },
}

/// What a report targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedContent {
    /// A post
    Post,
    /// A comment
    Comment,
    /// A user profile
    User,
}

/// Modals presented above the main flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Post composer
    CreatePost,
    /// Full-screen media viewer
    ImageViewer {
        /// Media URLs in display order
        images: Vec<String>,
        /// Index opened first
        initial_index: usize,
    },
    /// Share sheet for a post
    SharePost {
        /// Post being shared
        post_id: PostId,
    },
    /// Report dialog
    ReportContent {
        /// What kind of row is reported
        content_type: ReportedContent,
        /// Row id of the reported content
        content_id: Uuid,
    },
}
