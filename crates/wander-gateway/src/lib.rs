//! Wander Gateway - Backend Access Layer
//!
//! Thin translation of domain operations into single backend calls. This
//! layer owns no retry, batching, or caching policy: every call is
//! at-most-once-attempted and the backend's error surfaces verbatim as a
//! [`GatewayError`].
//!
//! # Architecture
//!
//! Three trait seams mirror the backend's service split:
//!
//! - [`AuthGateway`] - sign-up/in/out, session restore, auth-change
//!   subscription, password flows
//! - [`ProfileGateway`] - `profiles` row read/update
//! - [`PostGateway`] - feed query, post/comment CRUD, like edges and
//!   counter RPCs
//!
//! [`Backend`] bundles the three for consumers that need all of them.
//!
//! [`MemoryBackend`] is a complete in-process implementation used by
//! tests and local development, including fault injection for the
//! partial-failure paths a remote backend can exhibit.

pub mod error;
pub mod events;
pub mod memory;
pub mod traits;

pub use error::GatewayError;
pub use events::{AuthChange, AuthChangeKind};
pub use memory::{Fault, MemoryBackend};
pub use traits::{
    AuthGateway, Backend, PostGateway, ProfileGateway, SignInRequest, SignUpRequest,
};
