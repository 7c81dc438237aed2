//! Property tests for the root-flow selector: the mounted flow is a pure
//! function of the latest session snapshot, regardless of the history
//! that led there.

use proptest::prelude::*;
use time::OffsetDateTime;
use wander_app::{select_root_flow, Navigator, SessionSnapshot};
use wander_core::{Identity, Profile, UserId};

fn snapshot(loading: bool, identity: bool, onboarded: Option<bool>) -> SessionSnapshot {
    let id = UserId::new_v4();
    SessionSnapshot {
        loading,
        identity: identity.then(|| Identity {
            id,
            email: "user@example.com".to_string(),
        }),
        profile: onboarded.map(|completed| {
            let mut profile = Profile::new(id, "user@example.com", OffsetDateTime::now_utc());
            profile.onboarding_completed = completed;
            profile
        }),
    }
}

fn snapshot_strategy() -> impl Strategy<Value = SessionSnapshot> {
    (any::<bool>(), any::<bool>(), proptest::option::of(any::<bool>()))
        .prop_map(|(loading, identity, onboarded)| snapshot(loading, identity, onboarded))
}

proptest! {
    /// Whatever sequence of snapshots preceded it, the navigator mounts
    /// exactly the flow the selector derives from the final snapshot.
    #[test]
    fn test_mounted_flow_depends_only_on_final_snapshot(
        history in proptest::collection::vec(snapshot_strategy(), 1..12)
    ) {
        let mut navigator = Navigator::new();
        for snapshot in &history {
            navigator.apply(snapshot);
        }
        let last = history.last().unwrap();
        prop_assert_eq!(navigator.flow(), select_root_flow(last));
    }

    /// Applying the same snapshot twice never changes anything.
    #[test]
    fn test_apply_is_idempotent(
        history in proptest::collection::vec(snapshot_strategy(), 1..8)
    ) {
        let mut navigator = Navigator::new();
        for snapshot in &history {
            navigator.apply(snapshot);
        }
        let before = navigator.clone();
        navigator.apply(history.last().unwrap());
        prop_assert_eq!(navigator, before);
    }

    /// The selector itself ignores everything but the triple.
    #[test]
    fn test_selector_is_deterministic(
        loading in any::<bool>(),
        identity in any::<bool>(),
        onboarded in proptest::option::of(any::<bool>())
    ) {
        let a = snapshot(loading, identity, onboarded);
        let b = snapshot(loading, identity, onboarded);
        prop_assert_eq!(select_root_flow(&a), select_root_flow(&b));
    }
}
