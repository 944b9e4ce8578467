use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use juke_core::ports::{CredentialStorePort, ProfileGatewayPort};
use juke_core::profile::MusicProfile;
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Load the signed-in user's profile.
///
/// The profile's onboarding timestamp is written back as the local marker, so
/// opening the profile screen also settles an unknown onboarding status.
pub struct FetchMyProfile {
    store: Arc<dyn CredentialStorePort>,
    profiles: Arc<dyn ProfileGatewayPort>,
}

impl FetchMyProfile {
    pub fn new(store: Arc<dyn CredentialStorePort>, profiles: Arc<dyn ProfileGatewayPort>) -> Self {
        Self { store, profiles }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        Self::new(store, profiles)
    }

    pub async fn execute(&self) -> Result<MusicProfile, GatewayError> {
        async {
            let credential = require_credential(self.store.as_ref()).await?;
            let profile = self.profiles.fetch_my_profile(&credential.token).await?;

            let marker = profile.onboarding_completed_at.clone().unwrap_or_default();
            if self.store.set_onboarding_marker_if(&credential, &marker).await? {
                debug!(completed = !marker.trim().is_empty(), "Onboarding marker synced");
            } else {
                debug!("Signed-in user changed during profile fetch; marker not synced");
            }

            Ok(profile)
        }
        .instrument(info_span!("usecase.fetch_my_profile.execute"))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubProfileGateway;
    use juke_core::session::{Credential, PersistedSession};
    use juke_infra::InMemoryCredentialStore;

    fn signed_in_store() -> Arc<InMemoryCredentialStore> {
        Arc::new(InMemoryCredentialStore::with_session(
            PersistedSession::signed_in(Credential::new("alice", "t"), None),
        ))
    }

    #[tokio::test]
    async fn test_fetch_writes_completed_marker() {
        let store = signed_in_store();
        let use_case = FetchMyProfile::new(
            store.clone(),
            Arc::new(StubProfileGateway::completed_at("2025-03-01T00:00:00Z")),
        );

        use_case.execute().await.unwrap();

        assert_eq!(
            store.snapshot().onboarding_marker.as_deref(),
            Some("2025-03-01T00:00:00Z")
        );
    }

    #[tokio::test]
    async fn test_profile_without_timestamp_writes_empty_marker() {
        let store = signed_in_store();
        let use_case = FetchMyProfile::new(store.clone(), Arc::new(StubProfileGateway::not_completed()));

        use_case.execute().await.unwrap();

        assert_eq!(store.snapshot().onboarding_marker.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_failure_leaves_marker_unknown() {
        let store = signed_in_store();
        let use_case = FetchMyProfile::new(store.clone(), Arc::new(StubProfileGateway::failing()));

        assert!(use_case.execute().await.is_err());
        assert_eq!(store.snapshot().onboarding_marker, None);
    }

    #[tokio::test]
    async fn test_requires_credential() {
        let use_case = FetchMyProfile::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(StubProfileGateway::not_completed()),
        );

        assert!(matches!(
            use_case.execute().await,
            Err(GatewayError::NotAuthenticated)
        ));
    }
}
