//! Music profile models.

use serde::{Deserialize, Serialize};

/// A user's music profile as shown on profile screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicProfile {
    pub username: String,
    /// Falls back to `username` when the server sends a blank display name.
    pub display_name: String,
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    pub avatar_url: String,
    pub favorite_genres: Vec<String>,
    pub favorite_artists: Vec<String>,
    pub favorite_albums: Vec<String>,
    pub favorite_tracks: Vec<String>,
    pub onboarding_completed_at: Option<String>,
    pub is_owner: bool,
}

/// Search result row for profile lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    pub display_name: String,
    pub tagline: String,
    pub avatar_url: String,
}

/// Pick the display name, falling back to the username when blank.
pub fn display_name_or_username(display_name: Option<&str>, username: &str) -> String {
    match display_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => username.to_string(),
    }
}
