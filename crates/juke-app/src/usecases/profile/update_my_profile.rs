use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use juke_core::ports::{CredentialStorePort, ProfileGatewayPort};
use juke_core::profile::MusicProfile;
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Partially update the signed-in user's profile.
pub struct UpdateMyProfile {
    store: Arc<dyn CredentialStorePort>,
    profiles: Arc<dyn ProfileGatewayPort>,
}

impl UpdateMyProfile {
    pub fn new(store: Arc<dyn CredentialStorePort>, profiles: Arc<dyn ProfileGatewayPort>) -> Self {
        Self { store, profiles }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        Self::new(store, profiles)
    }

    /// `patch` must be a JSON object of the fields to change.
    pub async fn execute(&self, patch: serde_json::Value) -> Result<MusicProfile, GatewayError> {
        async {
            let fields = patch.as_object().map(|o| o.len()).ok_or_else(|| {
                GatewayError::Validation("Profile update must be a JSON object.".to_string())
            })?;
            if fields == 0 {
                return Err(GatewayError::Validation("Nothing to update.".to_string()));
            }

            let credential = require_credential(self.store.as_ref()).await?;
            let profile = self.profiles.update_my_profile(&credential.token, patch).await?;
            info!(fields, "Profile updated");
            Ok(profile)
        }
        .instrument(info_span!("usecase.update_my_profile.execute"))
        .await
    }
}
