use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use juke_core::ports::ProfileGatewayPort;
use juke_core::profile::{MusicProfile, ProfileSummary};
use juke_core::GatewayError;

use super::client::ApiClient;
use super::dto::{MusicProfileDto, Paginated, ProfileSearchEntry};

const ME_PATH: &str = "api/v1/music-profiles/me/";
const SEARCH_PATH: &str = "api/v1/music-profiles/search/";

pub struct HttpProfileGateway {
    client: ApiClient,
}

impl HttpProfileGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileGatewayPort for HttpProfileGateway {
    #[instrument(skip_all)]
    async fn fetch_my_profile(&self, token: &str) -> Result<MusicProfile, GatewayError> {
        let builder = self.client.request(Method::GET, ME_PATH, Some(token))?;
        let dto: MusicProfileDto = self.client.send_json(builder).await?;
        Ok(dto.into())
    }

    #[instrument(skip(self, token))]
    async fn search_profiles(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<ProfileSummary>, GatewayError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank profile search, skipping request");
            return Ok(Vec::new());
        }

        let builder = self
            .client
            .request(Method::GET, SEARCH_PATH, Some(token))?
            .query(&[("q", query)]);
        let page: Paginated<ProfileSearchEntry> = self.client.send_json(builder).await?;

        Ok(page.results.into_iter().map(ProfileSummary::from).collect())
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(
        &self,
        token: &str,
        username: &str,
    ) -> Result<MusicProfile, GatewayError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GatewayError::Validation("Enter a username.".to_string()));
        }
        let url = self
            .client
            .segments_url(&["api", "v1", "music-profiles", username])?;
        let builder = self.client.request_url(Method::GET, url, Some(token));
        let dto: MusicProfileDto = self.client.send_json(builder).await?;
        Ok(dto.into())
    }

    #[instrument(skip_all)]
    async fn update_my_profile(
        &self,
        token: &str,
        patch: serde_json::Value,
    ) -> Result<MusicProfile, GatewayError> {
        let builder = self
            .client
            .request(Method::PATCH, ME_PATH, Some(token))?
            .json(&patch);
        // Some deployments answer the PATCH with an empty body.
        let dto: Option<MusicProfileDto> = self.client.send_json(builder).await?;
        Ok(dto.unwrap_or_default().into())
    }
}
