//! Hand-written port doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use juke_core::auth::{Registration, DEFAULT_REGISTRATION_MESSAGE};
use juke_core::catalog::{Album, Artist, FeaturedGenre, Track};
use juke_core::playback::{ControlRequest, PlayRequest, PlaybackCommand, PlaybackState};
use juke_core::ports::*;
use juke_core::profile::{MusicProfile, ProfileSummary};
use juke_core::session::Credential;
use juke_core::world::{GlobePoint, GlobeQuery, OnlineUsersPage};
use juke_core::GatewayError;

pub(crate) fn network_down() -> GatewayError {
    GatewayError::Network("connection refused".to_string())
}

// --- Auth ---

#[derive(Default)]
pub(crate) struct StubAuthGateway {
    token: Mutex<Option<String>>,
    logout_fails: AtomicBool,
    revoked: Mutex<Vec<String>>,
    register_calls: AtomicUsize,
    verified: Mutex<Option<Credential>>,
}

impl StubAuthGateway {
    pub(crate) fn accepting(token: &str) -> Self {
        let stub = Self::default();
        *stub.token.lock().unwrap() = Some(token.to_string());
        stub
    }

    pub(crate) fn verifying_as(credential: Credential) -> Self {
        let stub = Self::default();
        *stub.verified.lock().unwrap() = Some(credential);
        stub
    }

    pub(crate) fn fail_logout(&self) {
        self.logout_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn revoked_tokens(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }

    pub(crate) fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGatewayPort for StubAuthGateway {
    async fn login(&self, _username: &str, _password: &str) -> Result<String, GatewayError> {
        self.token.lock().unwrap().clone().ok_or(GatewayError::Auth {
            status: 400,
            message: "Unable to log in with provided credentials.".to_string(),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<String, GatewayError> {
        registration.validate()?;
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DEFAULT_REGISTRATION_MESSAGE.to_string())
    }

    async fn logout(&self, token: &str) -> Result<(), GatewayError> {
        self.revoked.lock().unwrap().push(token.to_string());
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(network_down());
        }
        Ok(())
    }

    async fn resend_verification(&self, email: &str) -> Result<String, GatewayError> {
        Ok(format!("Verification sent to {email}."))
    }

    async fn verify_registration(
        &self,
        _user_id: &str,
        _timestamp: &str,
        _signature: &str,
    ) -> Result<Option<Credential>, GatewayError> {
        Ok(self.verified.lock().unwrap().clone())
    }
}

// --- Profiles ---

enum ProfileMode {
    Failing,
    CompletedAt(Option<String>),
    Gated,
}

pub(crate) struct StubProfileGateway {
    mode: ProfileMode,
    fetches: AtomicUsize,
    fetched_tokens: Mutex<Vec<String>>,
    fetching: Notify,
    release: Semaphore,
    patches: Mutex<Vec<serde_json::Value>>,
}

impl StubProfileGateway {
    fn with_mode(mode: ProfileMode) -> Self {
        Self {
            mode,
            fetches: AtomicUsize::new(0),
            fetched_tokens: Mutex::new(Vec::new()),
            fetching: Notify::new(),
            release: Semaphore::new(0),
            patches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self::with_mode(ProfileMode::Failing)
    }

    pub(crate) fn completed_at(marker: &str) -> Self {
        Self::with_mode(ProfileMode::CompletedAt(Some(marker.to_string())))
    }

    pub(crate) fn not_completed() -> Self {
        Self::with_mode(ProfileMode::CompletedAt(None))
    }

    /// Fetches block until [`release`](Self::release) is called, then fail.
    pub(crate) fn gated() -> Self {
        Self::with_mode(ProfileMode::Gated)
    }

    pub(crate) async fn wait_until_fetching(&self) {
        self.fetching.notified().await;
    }

    pub(crate) fn release(&self) {
        self.release.add_permits(1);
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Tokens passed to `fetch_my_profile`, in call order.
    pub(crate) fn fetched_tokens(&self) -> Vec<String> {
        self.fetched_tokens.lock().unwrap().clone()
    }

    pub(crate) fn patches(&self) -> Vec<serde_json::Value> {
        self.patches.lock().unwrap().clone()
    }

    fn profile(username: &str, completed_at: Option<String>) -> MusicProfile {
        MusicProfile {
            username: username.to_string(),
            display_name: username.to_string(),
            onboarding_completed_at: completed_at,
            is_owner: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ProfileGatewayPort for StubProfileGateway {
    async fn fetch_my_profile(&self, token: &str) -> Result<MusicProfile, GatewayError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetched_tokens.lock().unwrap().push(token.to_string());
        self.fetching.notify_one();
        match &self.mode {
            ProfileMode::Failing => Err(network_down()),
            ProfileMode::CompletedAt(marker) => Ok(Self::profile("me", marker.clone())),
            ProfileMode::Gated => {
                let _permit = self.release.acquire().await.map_err(|_| network_down())?;
                Err(network_down())
            }
        }
    }

    async fn search_profiles(
        &self,
        _token: &str,
        query: &str,
    ) -> Result<Vec<ProfileSummary>, GatewayError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![ProfileSummary {
            username: query.trim().to_string(),
            display_name: query.trim().to_string(),
            ..Default::default()
        }])
    }

    async fn fetch_profile(
        &self,
        _token: &str,
        username: &str,
    ) -> Result<MusicProfile, GatewayError> {
        match &self.mode {
            ProfileMode::Failing => Err(GatewayError::Server {
                status: 404,
                message: "Not found.".to_string(),
            }),
            _ => Ok(Self::profile(username, None)),
        }
    }

    async fn update_my_profile(
        &self,
        _token: &str,
        patch: serde_json::Value,
    ) -> Result<MusicProfile, GatewayError> {
        if matches!(self.mode, ProfileMode::Failing) {
            return Err(network_down());
        }
        let completed_at = patch
            .get("onboarding_completed_at")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        self.patches.lock().unwrap().push(patch);
        Ok(Self::profile("me", completed_at))
    }
}

// --- mockall doubles ---

mockall::mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogGatewayPort for Catalog {
        async fn search_artists(&self, token: &str, query: &str) -> Result<Vec<Artist>, GatewayError>;
        async fn search_albums(&self, token: &str, query: &str) -> Result<Vec<Album>, GatewayError>;
        async fn search_tracks(&self, token: &str, query: &str) -> Result<Vec<Track>, GatewayError>;
        async fn featured_genres(&self, token: &str) -> Result<Vec<FeaturedGenre>, GatewayError>;
    }
}

// --- Playback ---

#[derive(Default)]
pub(crate) struct StubPlaybackGateway {
    calls: Mutex<Vec<String>>,
    playing: Mutex<Option<PlaybackState>>,
}

impl StubPlaybackGateway {
    pub(crate) fn playing(provider: &str) -> Self {
        let stub = Self::default();
        *stub.playing.lock().unwrap() = Some(PlaybackState {
            provider: provider.to_string(),
            is_playing: true,
            progress_ms: 0,
            track: None,
            device: None,
            updated_at: None,
        });
        stub
    }

    /// `"<call> <token>"` entries in call order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str, token: &str) -> Option<PlaybackState> {
        self.calls.lock().unwrap().push(format!("{call} {token}"));
        self.playing.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackGatewayPort for StubPlaybackGateway {
    async fn play(
        &self,
        token: &str,
        _request: &PlayRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        Ok(self.record("play", token))
    }

    async fn control(
        &self,
        token: &str,
        command: PlaybackCommand,
        _request: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        Ok(self.record(command.path_segment(), token))
    }

    async fn state(
        &self,
        token: &str,
        provider: Option<&str>,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        let call = format!("state:{}", provider.unwrap_or("-"));
        Ok(self.record(&call, token))
    }
}

// --- World ---

#[derive(Default)]
pub(crate) struct StubWorldGateway {
    tokens_seen: Mutex<Vec<Option<String>>>,
    queries: Mutex<Vec<GlobeQuery>>,
}

impl StubWorldGateway {
    pub(crate) fn tokens_seen(&self) -> Vec<Option<String>> {
        self.tokens_seen.lock().unwrap().clone()
    }

    pub(crate) fn queries(&self) -> Vec<GlobeQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorldGatewayPort for StubWorldGateway {
    async fn globe_points(
        &self,
        token: Option<&str>,
        query: &GlobeQuery,
    ) -> Result<Vec<GlobePoint>, GatewayError> {
        self.tokens_seen.lock().unwrap().push(token.map(str::to_string));
        self.queries.lock().unwrap().push(query.clone());
        Ok(vec![GlobePoint {
            id: 1,
            username: "alice".to_string(),
            lat: 0.0,
            lng: 0.0,
            clout: 1.0,
            top_genre: "jazz".to_string(),
            display_name: "Alice".to_string(),
            location: None,
        }])
    }

    async fn online_users(
        &self,
        token: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<OnlineUsersPage, GatewayError> {
        self.tokens_seen.lock().unwrap().push(token.map(str::to_string));
        let results = (0..limit.min(3))
            .map(|i| MusicProfile {
                username: format!("user{}", offset + i),
                ..Default::default()
            })
            .collect();
        Ok(OnlineUsersPage::from_list(results))
    }
}
