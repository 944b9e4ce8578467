//! Playback remote control.

use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use juke_core::playback::{ControlRequest, PlayRequest, PlaybackCommand, PlaybackState};
use juke_core::ports::{CredentialStorePort, PlaybackGatewayPort};
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Play, pause, skip and query the signed-in user's provider.
///
/// Each call returns the provider state reported after the command, `None`
/// when nothing is playing.
pub struct PlaybackControls {
    store: Arc<dyn CredentialStorePort>,
    playback: Arc<dyn PlaybackGatewayPort>,
}

impl PlaybackControls {
    pub fn new(store: Arc<dyn CredentialStorePort>, playback: Arc<dyn PlaybackGatewayPort>) -> Self {
        Self { store, playback }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        playback: Arc<dyn PlaybackGatewayPort>,
    ) -> Self {
        Self::new(store, playback)
    }

    pub async fn play(&self, request: &PlayRequest) -> Result<Option<PlaybackState>, GatewayError> {
        async {
            let credential = require_credential(self.store.as_ref()).await?;
            let state = self.playback.play(&credential.token, request).await?;
            debug!(playing = state.is_some(), "Play sent");
            Ok(state)
        }
        .instrument(info_span!("usecase.playback.play"))
        .await
    }

    pub async fn pause(&self, request: &ControlRequest) -> Result<Option<PlaybackState>, GatewayError> {
        self.control(PlaybackCommand::Pause, request).await
    }

    pub async fn next(&self, request: &ControlRequest) -> Result<Option<PlaybackState>, GatewayError> {
        self.control(PlaybackCommand::Next, request).await
    }

    pub async fn previous(
        &self,
        request: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        self.control(PlaybackCommand::Previous, request).await
    }

    /// Current state, optionally for one provider.
    pub async fn state(&self, provider: Option<&str>) -> Result<Option<PlaybackState>, GatewayError> {
        let provider = provider.map(str::trim).filter(|p| !p.is_empty());
        async {
            let credential = require_credential(self.store.as_ref()).await?;
            self.playback.state(&credential.token, provider).await
        }
        .instrument(info_span!("usecase.playback.state"))
        .await
    }

    async fn control(
        &self,
        command: PlaybackCommand,
        request: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError> {
        async {
            let credential = require_credential(self.store.as_ref()).await?;
            self.playback.control(&credential.token, command, request).await
        }
        .instrument(info_span!("usecase.playback.control", command = command.path_segment()))
        .await
    }
}
