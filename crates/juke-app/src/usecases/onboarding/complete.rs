use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use juke_core::onboarding::OnboardingProfile;
use juke_core::ports::{CredentialStorePort, ProfileGatewayPort};
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Use case for completing onboarding.
///
/// PATCHes the profile with the wizard answers stamped with the current time,
/// then stores the same timestamp as the local marker. The session controller
/// picks the marker up and flips to `SignedIn { onboarding_completed: true }`.
pub struct CompleteOnboarding {
    store: Arc<dyn CredentialStorePort>,
    profiles: Arc<dyn ProfileGatewayPort>,
}

impl CompleteOnboarding {
    /// Create a new CompleteOnboarding use case from trait objects.
    pub fn new(store: Arc<dyn CredentialStorePort>, profiles: Arc<dyn ProfileGatewayPort>) -> Self {
        Self { store, profiles }
    }

    /// Convenience constructor for the UseCases accessor.
    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        Self::new(store, profiles)
    }

    /// Submit the answers. Returns the completion timestamp (RFC 3339).
    pub async fn execute(&self, answers: &OnboardingProfile) -> Result<String, GatewayError> {
        async {
            if answers.favorite_genres.iter().all(|g| g.trim().is_empty()) {
                return Err(GatewayError::Validation(
                    "Pick at least one favourite genre.".to_string(),
                ));
            }

            let credential = require_credential(self.store.as_ref()).await?;
            let completed_at = chrono::Utc::now().to_rfc3339();

            self.profiles
                .update_my_profile(&credential.token, answers.to_patch(&completed_at))
                .await?;
            if !self
                .store
                .set_onboarding_marker_if(&credential, &completed_at)
                .await?
            {
                debug!("Signed-in user changed while saving onboarding answers");
            }

            info!(%completed_at, "Onboarding completed");
            Ok(completed_at)
        }
        .instrument(info_span!("usecase.complete_onboarding.execute"))
        .await
    }
}
