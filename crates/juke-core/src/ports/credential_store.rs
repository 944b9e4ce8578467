use async_trait::async_trait;

use crate::error::CredentialStoreError;
use crate::observable::{Projection, Subscription};
use crate::session::{Credential, PersistedSession};

/// Durable store for the signed-in credential and the onboarding marker.
///
/// 凭据存储端口：持久化 token、用户名与引导完成标记。
///
/// Implementations own an [`crate::Observable`] of the full
/// [`PersistedSession`] and publish to it after each successful write, in
/// write order. Every mutation replaces the whole tuple in one durable step.
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    /// Subscribe to the persisted tuple. Replays the current value.
    fn observe(&self) -> Subscription<PersistedSession>;

    /// Credential sub-stream; `None` when either key is missing.
    fn observe_credential(&self) -> Projection<PersistedSession, Option<Credential>> {
        self.observe().map(PersistedSession::credential)
    }

    /// Onboarding marker sub-stream.
    fn observe_onboarding_marker(&self) -> Projection<PersistedSession, Option<String>> {
        self.observe().map(PersistedSession::onboarding_marker)
    }

    /// Store token and username, dropping any onboarding marker.
    ///
    /// 保存凭据并清除引导标记（单次原子写入）。
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;

    /// Remove token, username and marker.
    async fn clear(&self) -> Result<(), CredentialStoreError>;

    /// One-shot read of the stored credential.
    async fn current_credential(&self) -> Result<Option<Credential>, CredentialStoreError>;

    /// `None` removes the marker; any string, empty included, is stored as-is.
    async fn set_onboarding_marker(&self, marker: Option<&str>)
        -> Result<(), CredentialStoreError>;

    /// Store `marker` only if the stored credential still equals `expected`.
    ///
    /// The comparison and the write happen under the same write lock, so a
    /// logout or re-login that lands while a profile fetch is in flight can
    /// never receive the older user's marker. Returns whether it wrote.
    async fn set_onboarding_marker_if(
        &self,
        expected: &Credential,
        marker: &str,
    ) -> Result<bool, CredentialStoreError>;
}
