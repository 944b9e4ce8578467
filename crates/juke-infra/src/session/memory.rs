//! Volatile credential store.
//!
//! Same observable semantics as the file store without touching disk. Used by
//! tests and by the CLI's `--ephemeral` mode.

use async_trait::async_trait;
use tokio::sync::Mutex;

use juke_core::ports::CredentialStorePort;
use juke_core::session::{Credential, PersistedSession};
use juke_core::{CredentialStoreError, Observable, Subscription};

pub struct InMemoryCredentialStore {
    state: Observable<PersistedSession>,
    write_lock: Mutex<()>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_session(PersistedSession::default())
    }

    /// Start from an existing tuple, e.g. a user who is already signed in.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            state: Observable::new(session),
            write_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the stored tuple.
    pub fn snapshot(&self) -> PersistedSession {
        self.state.get()
    }

    async fn mutate(&self, f: impl FnOnce(&mut PersistedSession)) {
        self.mutate_if(|session| {
            f(session);
            true
        })
        .await;
    }

    async fn mutate_if(&self, f: impl FnOnce(&mut PersistedSession) -> bool) -> bool {
        let _guard = self.write_lock.lock().await;
        let mut next = self.state.get();
        if !f(&mut next) {
            return false;
        }
        self.state.set(next);
        true
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStorePort for InMemoryCredentialStore {
    fn observe(&self) -> Subscription<PersistedSession> {
        self.state.subscribe()
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let credential = credential.clone();
        self.mutate(move |session| {
            session.credential = Some(credential);
            session.onboarding_marker = None;
        })
        .await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        self.mutate(|session| *session = PersistedSession::default())
            .await;
        Ok(())
    }

    async fn current_credential(&self) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self.state.get().credential)
    }

    async fn set_onboarding_marker(
        &self,
        marker: Option<&str>,
    ) -> Result<(), CredentialStoreError> {
        let marker = marker.map(str::to_string);
        self.mutate(move |session| session.onboarding_marker = marker)
            .await;
        Ok(())
    }

    async fn set_onboarding_marker_if(
        &self,
        expected: &Credential,
        marker: &str,
    ) -> Result<bool, CredentialStoreError> {
        Ok(self
            .mutate_if(|session| {
                if session.credential.as_ref() != Some(expected) {
                    return false;
                }
                session.onboarding_marker = Some(marker.to_string());
                true
            })
            .await)
    }
}
