//! Playback models.
//!
//! These mirror the backend's playback payloads closely enough to be decoded
//! directly. Every optional request field is left out of the JSON body when
//! unset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackAlbum {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub album: Option<PlaybackAlbum>,
    #[serde(default)]
    pub artists: Vec<PlaybackArtist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackDevice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub volume_percent: Option<u8>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Snapshot of what a provider is currently playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub provider: String,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: u64,
    #[serde(default)]
    pub track: Option<PlaybackTrack>,
    #[serde(default)]
    pub device: Option<PlaybackDevice>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST playback/play/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

/// Body of the pause/next/previous calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Transport command sent to the active provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Pause,
    Next,
    Previous,
}

impl PlaybackCommand {
    pub fn path_segment(self) -> &'static str {
        match self {
            PlaybackCommand::Pause => "pause",
            PlaybackCommand::Next => "next",
            PlaybackCommand::Previous => "previous",
        }
    }
}

/// Decode a playback payload. `null`, `{}` and objects without a provider
/// all mean nothing is playing.
pub fn decode_playback_state(
    payload: serde_json::Value,
) -> Result<Option<PlaybackState>, serde_json::Error> {
    match &payload {
        serde_json::Value::Object(map) if map.contains_key("provider") => {
            serde_json::from_value(payload).map(Some)
        }
        _ => Ok(None),
    }
}
