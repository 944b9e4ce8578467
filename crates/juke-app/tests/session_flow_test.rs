//! End-to-end session flows: use cases writing the credential store, the
//! session controller projecting it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use juke_app::{AppDeps, SessionController, UseCases};
use juke_core::auth::Registration;
use juke_core::catalog::{Album, Artist, FeaturedGenre, Track};
use juke_core::onboarding::OnboardingProfile;
use juke_core::playback::{ControlRequest, PlayRequest, PlaybackCommand, PlaybackState};
use juke_core::ports::*;
use juke_core::profile::{MusicProfile, ProfileSummary};
use juke_core::session::{Credential, PersistedSession};
use juke_core::world::{GlobePoint, GlobeQuery, OnlineUsersPage};
use juke_core::{GatewayError, UiSessionState};
use juke_infra::InMemoryCredentialStore;

const WAIT: Duration = Duration::from_secs(5);

fn offline() -> GatewayError {
    GatewayError::Network("network unreachable".to_string())
}

// --- Auth ---

#[derive(Default)]
struct RecordingAuth {
    tokens: HashMap<String, String>,
    offline_logout: bool,
    register_calls: AtomicUsize,
    revoked: Mutex<Vec<String>>,
}

impl RecordingAuth {
    fn issuing(pairs: &[(&str, &str)]) -> Self {
        Self {
            tokens: pairs
                .iter()
                .map(|(user, token)| (user.to_string(), token.to_string()))
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AuthGatewayPort for RecordingAuth {
    async fn login(&self, username: &str, _password: &str) -> Result<String, GatewayError> {
        self.tokens.get(username).cloned().ok_or(GatewayError::Auth {
            status: 400,
            message: "Unable to log in with provided credentials.".to_string(),
        })
    }

    async fn register(&self, _registration: &Registration) -> Result<String, GatewayError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        Ok("Check your inbox.".to_string())
    }

    async fn logout(&self, token: &str) -> Result<(), GatewayError> {
        self.revoked.lock().unwrap().push(token.to_string());
        if self.offline_logout {
            return Err(offline());
        }
        Ok(())
    }

    async fn resend_verification(&self, _email: &str) -> Result<String, GatewayError> {
        Err(offline())
    }

    async fn verify_registration(
        &self,
        _user_id: &str,
        _timestamp: &str,
        _signature: &str,
    ) -> Result<Option<Credential>, GatewayError> {
        Err(offline())
    }
}

// --- Profiles ---

/// Profile backend keyed by token. Unknown tokens fail like an outage.
/// When `gated`, every `me/` fetch waits for a [`ScriptedProfiles::release`].
struct ScriptedProfiles {
    completed_at: Mutex<HashMap<String, Option<String>>>,
    gated: bool,
    release: Semaphore,
    fetching: Notify,
    searches: AtomicUsize,
}

impl ScriptedProfiles {
    fn open() -> Self {
        Self {
            completed_at: Mutex::new(HashMap::new()),
            gated: false,
            release: Semaphore::new(0),
            fetching: Notify::new(),
            searches: AtomicUsize::new(0),
        }
    }

    fn gated() -> Self {
        Self {
            gated: true,
            ..Self::open()
        }
    }

    fn knows(self, token: &str, completed_at: Option<&str>) -> Self {
        self.completed_at
            .lock()
            .unwrap()
            .insert(token.to_string(), completed_at.map(str::to_string));
        self
    }

    fn release(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl ProfileGatewayPort for ScriptedProfiles {
    async fn fetch_my_profile(&self, token: &str) -> Result<MusicProfile, GatewayError> {
        if self.gated {
            self.fetching.notify_one();
            self.release
                .acquire()
                .await
                .map_err(|_| offline())?
                .forget();
        }
        let known = self.completed_at.lock().unwrap().get(token).cloned();
        match known {
            Some(completed_at) => Ok(MusicProfile {
                username: token.to_string(),
                onboarding_completed_at: completed_at,
                ..Default::default()
            }),
            None => Err(offline()),
        }
    }

    async fn search_profiles(
        &self,
        _token: &str,
        _query: &str,
    ) -> Result<Vec<ProfileSummary>, GatewayError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn fetch_profile(
        &self,
        _token: &str,
        _username: &str,
    ) -> Result<MusicProfile, GatewayError> {
        Err(offline())
    }

    async fn update_my_profile(
        &self,
        token: &str,
        patch: serde_json::Value,
    ) -> Result<MusicProfile, GatewayError> {
        let completed_at = patch["onboarding_completed_at"].as_str().map(str::to_string);
        self.completed_at
            .lock()
            .unwrap()
            .insert(token.to_string(), completed_at.clone());
        Ok(MusicProfile {
            onboarding_completed_at: completed_at,
            ..Default::default()
        })
    }
}

// --- Unused ports ---

struct Offline;

#[async_trait]
impl CatalogGatewayPort for Offline {
    async fn search_artists(&self, _: &str, _: &str) -> Result<Vec<Artist>, GatewayError> {
        Err(offline())
    }
    async fn search_albums(&self, _: &str, _: &str) -> Result<Vec<Album>, GatewayError> {
        Err(offline())
    }
    async fn search_tracks(&self, _: &str, _: &str) -> Result<Vec<Track>, GatewayError> {
        Err(offline())
    }
    async fn featured_genres(&self, _: &str) -> Result<Vec<FeaturedGenre>, GatewayError> {
        Err(offline())
    }
}

#[async_trait]
impl PlaybackGatewayPort for Offline {
    async fn play(
        &self,
        _: &str,
        _: &PlayRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        Err(offline())
    }
    async fn control(
        &self,
        _: &str,
        _: PlaybackCommand,
        _: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        Err(offline())
    }
    async fn state(
        &self,
        _: &str,
        _: Option<&str>,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        Err(offline())
    }
}

#[async_trait]
impl WorldGatewayPort for Offline {
    async fn globe_points(
        &self,
        _: Option<&str>,
        _: &GlobeQuery,
    ) -> Result<Vec<GlobePoint>, GatewayError> {
        Err(offline())
    }
    async fn online_users(
        &self,
        _: Option<&str>,
        _: u32,
        _: u32,
    ) -> Result<OnlineUsersPage, GatewayError> {
        Err(offline())
    }
}

struct Harness {
    store: Arc<InMemoryCredentialStore>,
    auth: Arc<RecordingAuth>,
    profiles: Arc<ScriptedProfiles>,
    deps: AppDeps,
}

impl Harness {
    fn new(store: InMemoryCredentialStore, auth: RecordingAuth, profiles: ScriptedProfiles) -> Self {
        let store = Arc::new(store);
        let auth = Arc::new(auth);
        let profiles = Arc::new(profiles);
        let offline = Arc::new(Offline);
        let deps = AppDeps {
            credential_store: store.clone(),
            auth: auth.clone(),
            profiles: profiles.clone(),
            catalog: offline.clone(),
            playback: offline.clone(),
            world: offline,
        };
        Self {
            store,
            auth,
            profiles,
            deps,
        }
    }

    fn use_cases(&self) -> UseCases<'_> {
        UseCases::new(&self.deps)
    }
}

fn signed_in(username: &str, onboarding_completed: bool) -> UiSessionState {
    UiSessionState::SignedIn {
        username: username.to_string(),
        onboarding_completed,
    }
}

async fn wait_for_state(controller: &SessionController, expected: UiSessionState) {
    let mut states = controller.observe();
    let reached = tokio::time::timeout(WAIT, states.wait_for(|s| *s == expected)).await;
    assert!(
        matches!(reached, Ok(Some(_))),
        "never reached {expected:?}, last state {:?}",
        controller.current()
    );
}

#[tokio::test]
async fn test_login_with_failing_profile_fetch_ends_not_onboarded() {
    let harness = Harness::new(
        InMemoryCredentialStore::new(),
        RecordingAuth::issuing(&[("alice", "T1")]),
        ScriptedProfiles::gated(),
    );
    let controller = harness.deps.session_controller();
    wait_for_state(&controller, UiSessionState::SignedOut).await;

    let credential = harness
        .use_cases()
        .login()
        .execute("alice", "pw")
        .await
        .unwrap();
    assert_eq!(credential, Credential::new("alice", "T1"));
    assert_eq!(harness.store.snapshot().onboarding_marker, None);

    harness.profiles.fetching.notified().await;
    assert_eq!(controller.current(), UiSessionState::Loading);
    assert!(controller.is_refreshing());
    assert!(!controller.refresh_onboarding_status().await);

    harness.profiles.release();
    wait_for_state(&controller, signed_in("alice", false)).await;
    assert_eq!(
        harness.store.snapshot().onboarding_marker.as_deref(),
        Some("")
    );
}

#[tokio::test]
async fn test_register_password_mismatch_makes_no_call() {
    let harness = Harness::new(
        InMemoryCredentialStore::new(),
        RecordingAuth::default(),
        ScriptedProfiles::open(),
    );

    let err = harness
        .use_cases()
        .register()
        .execute(&Registration::new("bob", "bob@example.com", "a", "b"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(harness.auth.register_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.store.snapshot(), PersistedSession::default());
}

#[tokio::test]
async fn test_blank_profile_search_makes_no_call() {
    let harness = Harness::new(
        InMemoryCredentialStore::with_session(PersistedSession::signed_in(
            Credential::new("alice", "T1"),
            Some(String::new()),
        )),
        RecordingAuth::default(),
        ScriptedProfiles::open(),
    );

    let results = harness
        .use_cases()
        .search_profiles()
        .execute("   ")
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(harness.profiles.searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_logout_while_offline_still_signs_out() {
    let harness = Harness::new(
        InMemoryCredentialStore::with_session(PersistedSession::signed_in(
            Credential::new("alice", "T1"),
            Some("2024-05-01T10:00:00Z".to_string()),
        )),
        RecordingAuth {
            offline_logout: true,
            ..Default::default()
        },
        ScriptedProfiles::open(),
    );
    let controller = harness.deps.session_controller();
    wait_for_state(&controller, signed_in("alice", true)).await;

    controller.logout().await;

    assert_eq!(controller.current(), UiSessionState::SignedOut);
    assert_eq!(harness.store.snapshot(), PersistedSession::default());
    assert_eq!(*harness.auth.revoked.lock().unwrap(), vec!["T1".to_string()]);
}

#[tokio::test]
async fn test_complete_onboarding_flips_session() {
    let harness = Harness::new(
        InMemoryCredentialStore::with_session(PersistedSession::signed_in(
            Credential::new("alice", "T1"),
            Some(String::new()),
        )),
        RecordingAuth::default(),
        ScriptedProfiles::open().knows("T1", None),
    );
    let controller = harness.deps.session_controller();
    wait_for_state(&controller, signed_in("alice", false)).await;

    let answers = OnboardingProfile {
        favorite_genres: vec!["jazz".to_string()],
        ..Default::default()
    };
    let completed_at = harness
        .use_cases()
        .complete_onboarding()
        .execute(&answers)
        .await
        .unwrap();

    wait_for_state(&controller, signed_in("alice", true)).await;
    assert_eq!(
        harness.store.snapshot().onboarding_marker,
        Some(completed_at)
    );
}

#[tokio::test]
async fn test_refresh_result_for_replaced_credential_is_discarded() {
    let harness = Harness::new(
        InMemoryCredentialStore::new(),
        RecordingAuth::issuing(&[("alice", "T-alice"), ("bob", "T-bob")]),
        ScriptedProfiles::gated()
            .knows("T-alice", Some("2024-01-01T00:00:00Z"))
            .knows("T-bob", None),
    );
    let controller = harness.deps.session_controller();
    wait_for_state(&controller, UiSessionState::SignedOut).await;
    let login = harness.use_cases().login();

    login.execute("alice", "pw").await.unwrap();
    harness.profiles.fetching.notified().await;

    login.execute("bob", "pw").await.unwrap();
    harness.profiles.release();

    // alice's answer is dropped; bob gets his own fetch.
    harness.profiles.fetching.notified().await;
    assert_eq!(controller.current(), UiSessionState::Loading);
    assert_eq!(harness.store.snapshot().onboarding_marker, None);

    harness.profiles.release();
    wait_for_state(&controller, signed_in("bob", false)).await;
    assert_eq!(
        harness.store.snapshot().onboarding_marker.as_deref(),
        Some("")
    );
}

#[tokio::test]
async fn test_stored_marker_skips_refresh() {
    let harness = Harness::new(
        InMemoryCredentialStore::with_session(PersistedSession::signed_in(
            Credential::new("alice", "T1"),
            Some("  ".to_string()),
        )),
        RecordingAuth::default(),
        ScriptedProfiles::gated(),
    );
    let controller = harness.deps.session_controller();

    wait_for_state(&controller, signed_in("alice", false)).await;
    assert!(!controller.is_refreshing());
}
