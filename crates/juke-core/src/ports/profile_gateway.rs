use async_trait::async_trait;

use crate::error::GatewayError;
use crate::profile::{MusicProfile, ProfileSummary};

/// Music profile endpoints.
#[async_trait]
pub trait ProfileGatewayPort: Send + Sync {
    /// The signed-in user's own profile.
    async fn fetch_my_profile(&self, token: &str) -> Result<MusicProfile, GatewayError>;

    /// First page of matches. A blank query returns nothing without a request.
    async fn search_profiles(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<ProfileSummary>, GatewayError>;

    async fn fetch_profile(&self, token: &str, username: &str)
        -> Result<MusicProfile, GatewayError>;

    /// PATCH the signed-in user's profile with a partial JSON object.
    async fn update_my_profile(
        &self,
        token: &str,
        patch: serde_json::Value,
    ) -> Result<MusicProfile, GatewayError>;
}
