use async_trait::async_trait;

use crate::error::GatewayError;
use crate::playback::{ControlRequest, PlayRequest, PlaybackCommand, PlaybackState};

/// Remote control of the user's playback provider.
///
/// Every call answers with the provider state after the command, or `None`
/// when nothing is playing.
#[async_trait]
pub trait PlaybackGatewayPort: Send + Sync {
    async fn play(
        &self,
        token: &str,
        request: &PlayRequest,
    ) -> Result<Option<PlaybackState>, GatewayError>;

    /// Pause, skip forward or skip back.
    async fn control(
        &self,
        token: &str,
        command: PlaybackCommand,
        request: &ControlRequest,
    ) -> Result<Option<PlaybackState>, GatewayError>;

    async fn state(
        &self,
        token: &str,
        provider: Option<&str>,
    ) -> Result<Option<PlaybackState>, GatewayError>;
}
