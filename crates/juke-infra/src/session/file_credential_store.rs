//! File-backed credential store.
//!
//! The session lives in one small JSON object of string keys
//! (`token`, `username`, `onboarding_completed_at`). Every mutation rewrites
//! the whole object through a temp file and a rename, so a reader sees either
//! the previous state or the new one, never a mix.
//!
//! 会话文件：整体替换写入（临时文件 + rename），读者不会看到部分状态。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use juke_core::ports::CredentialStorePort;
use juke_core::session::{
    Credential, PersistedSession, ONBOARDING_COMPLETED_AT_KEY, TOKEN_KEY, USERNAME_KEY,
};
use juke_core::{CredentialStoreError, Observable, Subscription};

/// Logical store name shared with the mobile clients.
pub const STORE_NAME: &str = "juke_session";

/// File name under the data directory.
pub const SESSION_FILE_NAME: &str = "juke_session.json";

pub struct FileCredentialStore {
    path: PathBuf,
    state: Observable<PersistedSession>,
    // Serialises read-modify-write cycles so publishes follow write order.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Open the store at `path`, loading whatever is already there.
    ///
    /// A missing or blank file is an empty session; a file that is not a JSON
    /// object of strings is [`CredentialStoreError::Corrupt`].
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CredentialStoreError> {
        let path = path.into();
        let initial = load_session(&path).await?;
        info!(
            path = %path.display(),
            signed_in = initial.credential.is_some(),
            "Opened credential store"
        );
        Ok(Self {
            path,
            state: Observable::new(initial),
            write_lock: Mutex::new(()),
        })
    }

    /// Open `<data_dir>/juke_session.json`.
    pub async fn open_in(data_dir: &Path) -> Result<Self, CredentialStoreError> {
        Self::open(data_dir.join(SESSION_FILE_NAME)).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to the current tuple, persist the result, then publish it.
    async fn mutate(
        &self,
        f: impl FnOnce(&mut PersistedSession),
    ) -> Result<(), CredentialStoreError> {
        self.mutate_if(|session| {
            f(session);
            true
        })
        .await
        .map(|_| ())
    }

    /// Like [`Self::mutate`], but `f` may decline the write by returning
    /// `false`. Nothing is written or published in that case.
    async fn mutate_if(
        &self,
        f: impl FnOnce(&mut PersistedSession) -> bool,
    ) -> Result<bool, CredentialStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.state.get();
        if !f(&mut next) {
            return Ok(false);
        }

        let content = encode_session(&next)?;
        self.atomic_write(&content).await?;
        self.state.set(next);
        Ok(true)
    }

    async fn atomic_write(&self, content: &str) -> Result<(), CredentialStoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;

        if let Err(err) = fs::rename(&tmp_path, &self.path).await {
            warn!(
                error = %err,
                tmp = %tmp_path.display(),
                "Rename of temp session file failed"
            );
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }

        debug!(path = %self.path.display(), "Session file written");
        Ok(())
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    fn observe(&self) -> Subscription<PersistedSession> {
        self.state.subscribe()
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let credential = credential.clone();
        self.mutate(move |session| {
            session.credential = Some(credential);
            session.onboarding_marker = None;
        })
        .await
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        self.mutate(|session| *session = PersistedSession::default())
            .await
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
            .await
    }

    async fn set_onboarding_marker_if(
        &self,
        expected: &Credential,
        marker: &str,
    ) -> Result<bool, CredentialStoreError> {
        self.mutate_if(|session| {
            if session.credential.as_ref() != Some(expected) {
                return false;
            }
            session.onboarding_marker = Some(marker.to_string());
            true
        })
        .await
    }
}

async fn load_session(path: &Path) -> Result<PersistedSession, CredentialStoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PersistedSession::default());
        }
        Err(err) => return Err(err.into()),
    };
    decode_session(&content)
}

fn decode_session(content: &str) -> Result<PersistedSession, CredentialStoreError> {
    if content.trim().is_empty() {
        return Ok(PersistedSession::default());
    }

    let mut entries: BTreeMap<String, String> = serde_json::from_str(content)
        .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?;

    Ok(PersistedSession {
        credential: Credential::from_parts(
            entries.remove(USERNAME_KEY),
            entries.remove(TOKEN_KEY),
        ),
        onboarding_marker: entries.remove(ONBOARDING_COMPLETED_AT_KEY),
    })
}

fn encode_session(session: &PersistedSession) -> Result<String, CredentialStoreError> {
    let mut entries = BTreeMap::new();
    if let Some(credential) = &session.credential {
        entries.insert(TOKEN_KEY, credential.token.as_str());
        entries.insert(USERNAME_KEY, credential.username.as_str());
    }
    if let Some(marker) = &session.onboarding_marker {
        entries.insert(ONBOARDING_COMPLETED_AT_KEY, marker.as_str());
    }
    serde_json::to_string_pretty(&entries)
        .map_err(|e| CredentialStoreError::Serialize(e.to_string()))
}
