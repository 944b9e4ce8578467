use std::sync::Arc;

use tracing::{info_span, Instrument};

use juke_core::ports::{CredentialStorePort, WorldGatewayPort};
use juke_core::world::OnlineUsersPage;
use juke_core::GatewayError;

use crate::usecases::internal::optional_token;

/// Default page size for the online users list.
pub const DEFAULT_ONLINE_LIMIT: u32 = 20;
const MAX_ONLINE_LIMIT: u32 = 100;

/// Page through users currently online.
pub struct ListOnlineUsers {
    store: Arc<dyn CredentialStorePort>,
    world: Arc<dyn WorldGatewayPort>,
}

impl ListOnlineUsers {
    pub fn new(store: Arc<dyn CredentialStorePort>, world: Arc<dyn WorldGatewayPort>) -> Self {
        Self { store, world }
    }

    pub fn from_ports(store: Arc<dyn CredentialStorePort>, world: Arc<dyn WorldGatewayPort>) -> Self {
        Self::new(store, world)
    }

    /// `limit` is clamped to 1..=100.
    pub async fn execute(&self, limit: u32, offset: u32) -> Result<OnlineUsersPage, GatewayError> {
        let limit = limit.clamp(1, MAX_ONLINE_LIMIT);
        async {
            let token = optional_token(self.store.as_ref()).await?;
            self.world.online_users(token.as_deref(), limit, offset).await
        }
        .instrument(info_span!("usecase.list_online_users.execute", limit, offset))
        .await
    }
}
