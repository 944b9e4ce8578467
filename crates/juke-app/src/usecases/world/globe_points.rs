use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use juke_core::ports::{CredentialStorePort, WorldGatewayPort};
use juke_core::world::{GlobePoint, GlobeQuery};
use juke_core::GatewayError;

use crate::usecases::internal::optional_token;

/// Load the points shown on the Juke World globe.
///
/// Works signed out; the token is attached when one is stored.
pub struct LoadGlobePoints {
    store: Arc<dyn CredentialStorePort>,
    world: Arc<dyn WorldGatewayPort>,
}

impl LoadGlobePoints {
    pub fn new(store: Arc<dyn CredentialStorePort>, world: Arc<dyn WorldGatewayPort>) -> Self {
        Self { store, world }
    }

    pub fn from_ports(store: Arc<dyn CredentialStorePort>, world: Arc<dyn WorldGatewayPort>) -> Self {
        Self::new(store, world)
    }

    pub async fn execute(&self, query: &GlobeQuery) -> Result<Vec<GlobePoint>, GatewayError> {
        if query.min_lat > query.max_lat || query.min_lng > query.max_lng {
            return Err(GatewayError::Validation(
                "Globe bounds are inverted.".to_string(),
            ));
        }

        async {
            let token = optional_token(self.store.as_ref()).await?;
            let points = self.world.globe_points(token.as_deref(), query).await?;
            debug!(count = points.len(), "Globe points loaded");
            Ok(points)
        }
        .instrument(info_span!("usecase.load_globe_points.execute", zoom = query.zoom))
        .await
    }
}
