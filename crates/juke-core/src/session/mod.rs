//! Session domain models
//!
//! This module defines the authenticated-identity state of the current user:
//! the durable credential, the onboarding marker persisted next to it, and the
//! UI-facing projection derived from both.

mod state_machine;

pub use state_machine::{project_session, SessionProjection};

use serde::{Deserialize, Serialize};

/// Persisted key names, shared by every credential store implementation.
pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const ONBOARDING_COMPLETED_AT_KEY: &str = "onboarding_completed_at";

/// Durable (username, token) pair.
///
/// Both halves travel together: a session with one but not the other is
/// modelled as no credential at all.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub token: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Build a credential from the two optional persisted keys.
    pub fn from_parts(username: Option<String>, token: Option<String>) -> Option<Self> {
        match (username, token) {
            (Some(username), Some(token)) => Some(Self { username, token }),
            _ => None,
        }
    }
}

// Tokens never reach logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Full persisted tuple owned by the credential store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub credential: Option<Credential>,
    /// `None` = unknown, needs fetch. Non-blank = completed. Blank = checked, not completed.
    pub onboarding_marker: Option<String>,
}

impl PersistedSession {
    pub fn signed_in(credential: Credential, onboarding_marker: Option<String>) -> Self {
        Self {
            credential: Some(credential),
            onboarding_marker,
        }
    }

    pub fn credential(&self) -> Option<Credential> {
        self.credential.clone()
    }

    pub fn onboarding_marker(&self) -> Option<String> {
        self.onboarding_marker.clone()
    }
}

/// Whether an onboarding marker value means "completed".
pub fn marker_is_completed(marker: &str) -> bool {
    !marker.trim().is_empty()
}

/// UI-facing session state.
///
/// 面向 UI 的会话状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiSessionState {
    /// Initial state, or onboarding status unknown and being fetched.
    ///
    /// 初始状态，或正在获取引导状态。
    #[default]
    Loading,
    /// No valid credential.
    ///
    /// 未登录。
    SignedOut,
    /// Authenticated.
    ///
    /// 已登录。
    SignedIn {
        username: String,
        onboarding_completed: bool,
    },
}

impl UiSessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, UiSessionState::SignedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            UiSessionState::SignedIn { username, .. } => Some(username),
            _ => None,
        }
    }
}
