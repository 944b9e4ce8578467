use std::sync::Arc;

use tracing::{info_span, Instrument};

use juke_core::ports::{CredentialStorePort, ProfileGatewayPort};
use juke_core::profile::MusicProfile;
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Load another user's profile by username.
pub struct GetProfile {
    store: Arc<dyn CredentialStorePort>,
    profiles: Arc<dyn ProfileGatewayPort>,
}

impl GetProfile {
    pub fn new(store: Arc<dyn CredentialStorePort>, profiles: Arc<dyn ProfileGatewayPort>) -> Self {
        Self { store, profiles }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        Self::new(store, profiles)
    }

    pub async fn execute(&self, username: &str) -> Result<MusicProfile, GatewayError> {
        let username = username.trim();
        async {
            if username.is_empty() {
                return Err(GatewayError::Validation("Username is required.".to_string()));
            }
            let credential = require_credential(self.store.as_ref()).await?;
            self.profiles.fetch_profile(&credential.token, username).await
        }
        .instrument(info_span!("usecase.get_profile.execute", username = %username))
        .await
    }
}
