//! Business logic use cases
//! 每个用户可见的操作对应一个 Use Case。
//!
//! Login / Register / VerifyRegistration
//         ↓
// CredentialStore  ──►  SessionController  →  UiSessionState
//         ↓
// FetchMyProfile / CompleteOnboarding      →  onboarding marker
// ---------------------------------
// SearchCatalog / PlaybackControls / LoadGlobePoints → 页面数据

pub mod auth;
pub mod catalog;
pub mod internal;
pub mod onboarding;
pub mod playback;
pub mod profile;
pub mod world;

pub use auth::{Login, Register, ResendVerification, VerifyRegistration};
pub use catalog::{GetFeaturedGenres, SearchCatalog};
pub use onboarding::CompleteOnboarding;
pub use playback::PlaybackControls;
pub use profile::{FetchMyProfile, GetProfile, SearchProfiles, UpdateMyProfile};
pub use world::{ListOnlineUsers, LoadGlobePoints};

use crate::deps::AppDeps;

/// Use case accessor over an [`AppDeps`] set.
/// 基于 AppDeps 的 Use Case 访问器。
///
/// Each call builds a fresh, cheap use case holding clones of the ports it needs.
pub struct UseCases<'a> {
    deps: &'a AppDeps,
}

impl<'a> UseCases<'a> {
    pub fn new(deps: &'a AppDeps) -> Self {
        Self { deps }
    }

    /// # Examples
    ///
    /// ```rust,no_run
    /// # use juke_app::{AppDeps, UseCases};
    /// # async fn example(deps: &AppDeps) -> Result<(), juke_core::GatewayError> {
    /// let credential = UseCases::new(deps).login().execute("alice", "secret").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn login(&self) -> Login {
        Login::from_ports(self.deps.credential_store.clone(), self.deps.auth.clone())
    }

    pub fn register(&self) -> Register {
        Register::from_ports(self.deps.auth.clone())
    }

    pub fn resend_verification(&self) -> ResendVerification {
        ResendVerification::from_ports(self.deps.auth.clone())
    }

    pub fn verify_registration(&self) -> VerifyRegistration {
        VerifyRegistration::from_ports(self.deps.credential_store.clone(), self.deps.auth.clone())
    }

    pub fn fetch_my_profile(&self) -> FetchMyProfile {
        FetchMyProfile::from_ports(self.deps.credential_store.clone(), self.deps.profiles.clone())
    }

    pub fn get_profile(&self) -> GetProfile {
        GetProfile::from_ports(self.deps.credential_store.clone(), self.deps.profiles.clone())
    }

    pub fn search_profiles(&self) -> SearchProfiles {
        SearchProfiles::from_ports(self.deps.credential_store.clone(), self.deps.profiles.clone())
    }

    pub fn update_my_profile(&self) -> UpdateMyProfile {
        UpdateMyProfile::from_ports(self.deps.credential_store.clone(), self.deps.profiles.clone())
    }

    pub fn complete_onboarding(&self) -> CompleteOnboarding {
        CompleteOnboarding::from_ports(self.deps.credential_store.clone(), self.deps.profiles.clone())
    }

    pub fn search_catalog(&self) -> SearchCatalog {
        SearchCatalog::from_ports(self.deps.credential_store.clone(), self.deps.catalog.clone())
    }

    pub fn featured_genres(&self) -> GetFeaturedGenres {
        GetFeaturedGenres::from_ports(self.deps.credential_store.clone(), self.deps.catalog.clone())
    }

    pub fn playback(&self) -> PlaybackControls {
        PlaybackControls::from_ports(self.deps.credential_store.clone(), self.deps.playback.clone())
    }

    pub fn globe_points(&self) -> LoadGlobePoints {
        LoadGlobePoints::from_ports(self.deps.credential_store.clone(), self.deps.world.clone())
    }

    pub fn online_users(&self) -> ListOnlineUsers {
        ListOnlineUsers::from_ports(self.deps.credential_store.clone(), self.deps.world.clone())
    }
}
