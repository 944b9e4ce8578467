use std::sync::Arc;

use tracing::{info_span, Instrument};

use juke_core::ports::{CredentialStorePort, ProfileGatewayPort};
use juke_core::profile::ProfileSummary;
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Free-text profile search. A blank query returns nothing and sends nothing.
pub struct SearchProfiles {
    store: Arc<dyn CredentialStorePort>,
    profiles: Arc<dyn ProfileGatewayPort>,
}

impl SearchProfiles {
    pub fn new(store: Arc<dyn CredentialStorePort>, profiles: Arc<dyn ProfileGatewayPort>) -> Self {
        Self { store, profiles }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        profiles: Arc<dyn ProfileGatewayPort>,
    ) -> Self {
        Self::new(store, profiles)
    }

    pub async fn execute(&self, query: &str) -> Result<Vec<ProfileSummary>, GatewayError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        async {
            let credential = require_credential(self.store.as_ref()).await?;
            self.profiles.search_profiles(&credential.token, query).await
        }
        .instrument(info_span!("usecase.search_profiles.execute", query = %query))
        .await
    }
}
