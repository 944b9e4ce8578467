//! Session projection.
//!
//! Defines a pure function from the persisted tuple
//! `(token, username, onboarding marker)` to the UI-facing state.

use super::{marker_is_completed, PersistedSession, UiSessionState};

/// Result of projecting a persisted session.
///
/// 会话投影结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProjection {
    pub state: UiSessionState,
    /// The onboarding status is unknown and should be fetched.
    ///
    /// 引导状态未知，需要刷新。
    pub needs_onboarding_refresh: bool,
}

/// Project a persisted session into a [`UiSessionState`].
///
/// 1. no credential → `SignedOut`
/// 2. credential, marker unknown → `Loading` plus a refresh request
/// 3. credential and marker → `SignedIn`, completed iff the marker is non-blank
pub fn project_session(persisted: &PersistedSession) -> SessionProjection {
    let Some(credential) = &persisted.credential else {
        return SessionProjection {
            state: UiSessionState::SignedOut,
            needs_onboarding_refresh: false,
        };
    };

    match &persisted.onboarding_marker {
        None => SessionProjection {
            state: UiSessionState::Loading,
            needs_onboarding_refresh: true,
        },
        Some(marker) => SessionProjection {
            state: UiSessionState::SignedIn {
                username: credential.username.clone(),
                onboarding_completed: marker_is_completed(marker),
            },
            needs_onboarding_refresh: false,
        },
    }
}
