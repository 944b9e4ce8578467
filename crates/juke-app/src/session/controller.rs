//! # Session Controller / 会话控制器
//!
//! Keeps a [`UiSessionState`] continuously projected from the credential
//! store and owns the two session side effects: the onboarding status refresh
//! and local-first logout.
//!
//! 将凭据存储持续投影为 UI 会话状态，并负责引导状态刷新与本地优先的登出。
//!
//! ```text
//! CredentialStore ──(PersistedSession)──> projection task ──> Observable<UiSessionState>
//!        ▲                                      │
//!        └──── set_onboarding_marker_if ◄── refresh (ProfileGateway)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use juke_core::ports::{AuthGatewayPort, CredentialStorePort, ProfileGatewayPort};
use juke_core::session::{project_session, Credential, PersistedSession, UiSessionState};
use juke_core::{Observable, Subscription};

/// Projects the persisted session into UI state.
///
/// One instance per process. Dropping it (or calling [`shutdown`]) stops the
/// projection; in-flight refreshes and logouts run to completion.
///
/// [`shutdown`]: SessionController::shutdown
pub struct SessionController {
    inner: Arc<Inner>,
    projector: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    store: Arc<dyn CredentialStorePort>,
    auth: Arc<dyn AuthGatewayPort>,
    profiles: Arc<dyn ProfileGatewayPort>,
    state: Observable<UiSessionState>,
    refresh_in_flight: AtomicBool,
    logout_lock: tokio::sync::Mutex<()>,
}

impl SessionController {
    /// Create the controller and start projecting the store.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        store: Arc<dyn CredentialStorePort>,
        auth: Arc<dyn AuthGatewayPort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        let inner = Arc::new(Inner {
            store,
            auth,
            profiles,
            state: Observable::new(UiSessionState::Loading),
            refresh_in_flight: AtomicBool::new(false),
            logout_lock: tokio::sync::Mutex::new(()),
        });

        let sessions = inner.store.observe();
        let projector = tokio::spawn(
            Arc::clone(&inner)
                .run_projection(sessions)
                .instrument(info_span!("session.projection")),
        );

        Self {
            inner,
            projector: Mutex::new(Some(projector)),
        }
    }

    /// Subscribe to the UI state. Replays the current value; never errors.
    pub fn observe(&self) -> Subscription<UiSessionState> {
        self.inner.state.subscribe()
    }

    pub fn current(&self) -> UiSessionState {
        self.inner.state.get()
    }

    /// Sign out locally, then revoke the token server-side on a best-effort basis.
    ///
    /// Always ends in [`UiSessionState::SignedOut`]. Concurrent calls queue up
    /// behind each other; later ones find nothing left to revoke.
    pub async fn logout(&self) {
        let span = info_span!("session.logout");
        let inner = &self.inner;

        async {
            let _guard = inner.logout_lock.lock().await;

            let credential = match inner.store.current_credential().await {
                Ok(credential) => credential,
                Err(err) => {
                    warn!(error = %err, "Could not read credential before logout");
                    None
                }
            };

            if let Err(err) = inner.store.clear().await {
                error!(error = %err, "Failed to clear credential store");
            }
            inner.state.set_if_changed(UiSessionState::SignedOut);

            let Some(credential) = credential else {
                debug!("No stored credential, skipping remote logout");
                return;
            };

            match inner.auth.logout(&credential.token).await {
                Ok(()) => info!(username = %credential.username, "Signed out"),
                Err(err) => warn!(
                    username = %credential.username,
                    error = %err,
                    "Remote logout failed; local session already cleared"
                ),
            }
        }
        .instrument(span)
        .await
    }

    /// Re-check the onboarding status of the stored credential.
    ///
    /// Returns `false` when nobody is signed in or a refresh is already running.
    pub async fn refresh_onboarding_status(&self) -> bool {
        match self.inner.store.current_credential().await {
            Ok(Some(credential)) => self.inner.trigger_refresh(credential),
            Ok(None) => false,
            Err(err) => {
                error!(error = %err, "Could not read credential for onboarding refresh");
                false
            }
        }
    }

    /// Whether an onboarding refresh is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh_in_flight.load(Ordering::Acquire)
    }

    /// Stop projecting store changes. The last published state stays readable.
    pub fn shutdown(&self) {
        let handle = match self.projector.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
            debug!("Session projection stopped");
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Inner {
    async fn run_projection(self: Arc<Self>, mut sessions: Subscription<PersistedSession>) {
        let mut session = sessions.latest();
        loop {
            self.apply(&session);
            match sessions.changed().await {
                Some(next) => session = next,
                None => {
                    warn!("Credential store closed; treating session as signed out");
                    self.state.set_if_changed(UiSessionState::SignedOut);
                    return;
                }
            }
        }
    }

    fn apply(self: &Arc<Self>, session: &PersistedSession) {
        let projection = project_session(session);
        if self.state.set_if_changed(projection.state.clone()) {
            debug!(state = ?projection.state, "Session state changed");
        }

        if projection.needs_onboarding_refresh {
            if let Some(credential) = session.credential() {
                self.trigger_refresh(credential);
            }
        }
    }

    /// Start a refresh unless one is already running.
    fn trigger_refresh(self: &Arc<Self>, credential: Credential) -> bool {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Onboarding refresh already in flight");
            return false;
        }

        let inner = Arc::clone(self);
        tokio::spawn(
            async move {
                inner.refresh(&credential).await;
                inner.refresh_in_flight.store(false, Ordering::Release);
                inner.follow_up_refresh(&credential);
            }
            .instrument(info_span!("session.refresh_onboarding")),
        );
        true
    }

    async fn refresh(&self, credential: &Credential) {
        let marker = match self.profiles.fetch_my_profile(&credential.token).await {
            Ok(profile) => profile.onboarding_completed_at.unwrap_or_default(),
            Err(err) => {
                // Fail open: an unreachable profile service must not leave the user on Loading.
                warn!(error = %err, "Onboarding status fetch failed; assuming not completed");
                String::new()
            }
        };

        match self.store.set_onboarding_marker_if(credential, &marker).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Credential changed during onboarding refresh; discarding result");
            }
            Err(err) => {
                error!(error = %err, "Failed to persist onboarding marker");
                self.state.set_if_changed(UiSessionState::SignedOut);
            }
        }
    }

    /// A different user may have signed in while the guard was held; their
    /// trigger was dropped, so re-run it now.
    fn follow_up_refresh(self: &Arc<Self>, refreshed: &Credential) {
        let latest = self.store.observe().current();
        if !project_session(&latest).needs_onboarding_refresh {
            return;
        }
        if let Some(credential) = latest.credential() {
            if credential != *refreshed {
                self.trigger_refresh(credential);
            }
        }
    }
}
