use std::sync::Arc;

use tracing::{info_span, Instrument};

use juke_core::catalog::FeaturedGenre;
use juke_core::ports::{CatalogGatewayPort, CredentialStorePort};
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Genres offered on the onboarding and discovery screens.
pub struct GetFeaturedGenres {
    store: Arc<dyn CredentialStorePort>,
    catalog: Arc<dyn CatalogGatewayPort>,
}

impl GetFeaturedGenres {
    pub fn new(store: Arc<dyn CredentialStorePort>, catalog: Arc<dyn CatalogGatewayPort>) -> Self {
        Self { store, catalog }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        catalog: Arc<dyn CatalogGatewayPort>,
    ) -> Self {
        Self::new(store, catalog)
    }

    pub async fn execute(&self) -> Result<Vec<FeaturedGenre>, GatewayError> {
        async {
            let credential = require_credential(self.store.as_ref()).await?;
            self.catalog.featured_genres(&credential.token).await
        }
        .instrument(info_span!("usecase.get_featured_genres.execute"))
        .await
    }
}
