use async_trait::async_trait;

use crate::error::GatewayError;
use crate::world::{GlobePoint, GlobeQuery, OnlineUsersPage};

/// Juke World endpoints. Both are readable anonymously.
#[async_trait]
pub trait WorldGatewayPort: Send + Sync {
    async fn globe_points(
        &self,
        token: Option<&str>,
        query: &GlobeQuery,
    ) -> Result<Vec<GlobePoint>, GatewayError>;

    async fn online_users(
        &self,
        token: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<OnlineUsersPage, GatewayError>;
}
