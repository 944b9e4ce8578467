use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use juke_core::playback::{
    decode_playback_state, ControlRequest, PlayRequest, PlaybackCommand, PlaybackState,
};
use juke_core::ports::PlaybackGatewayPort;
use juke_core::GatewayError;

use super::client::ApiClient;

const PLAY_PATH: &str = "api/v1/playback/play/";
const STATE_PATH: &str = "api/v1/playback/state/";

pub struct HttpPlaybackGateway {
    client: ApiClient,
}

impl HttpPlaybackGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn send_state(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        let payload = self.client.send_value(builder).await?;
        let state = decode_playback_state(payload)
            .map_err(|e| GatewayError::Network(format!("malformed playback state: {e}")))?;
        debug!(
            playing = state.as_ref().map(|s| s.is_playing).unwrap_or(false),
            "Playback state received"
        );
        Ok(state)
    }
}

#[async_trait]
impl PlaybackGatewayPort for HttpPlaybackGateway {
    #[instrument(skip(self, token))]
    async fn play(
        &self,
        token: &str,
        request: &PlayRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        let builder = self
            .client
            .request(Method::POST, PLAY_PATH, Some(token))?
            .json(request);
        self.send_state(builder).await
    }

    #[instrument(skip(self, token))]
    async fn control(
        &self,
        token: &str,
        command: PlaybackCommand,
        request: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        let path = format!("api/v1/playback/{}/", command.path_segment());
        let builder = self
            .client
            .request(Method::POST, &path, Some(token))?
            .json(request);
        self.send_state(builder).await
    }

    #[instrument(skip(self, token))]
    async fn state(
        &self,
        token: &str,
        provider: Option<&str>,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        let mut builder = self.client.request(Method::GET, STATE_PATH, Some(token))?;
        if let Some(provider) = provider.filter(|p| !p.is_empty()) {
            builder = builder.query(&[("provider", provider)]);
        }
        self.send_state(builder).await
    }
}
