//! Music catalog models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Album type used when the server leaves it blank.
pub const DEFAULT_ALBUM_TYPE: &str = "ALBUM";

/// Which catalog resource a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Artists,
    Albums,
    Tracks,
}

impl CatalogKind {
    /// Path segment under `/api/v1/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            CatalogKind::Artists => "artists",
            CatalogKind::Albums => "albums",
            CatalogKind::Tracks => "tracks",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Artists => "Artists",
            CatalogKind::Albums => "Albums",
            CatalogKind::Tracks => "Tracks",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artists" | "artist" => Ok(CatalogKind::Artists),
            "albums" | "album" => Ok(CatalogKind::Albums),
            "tracks" | "track" => Ok(CatalogKind::Tracks),
            other => Err(format!("unknown catalog kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub followers: u64,
    pub popularity: u32,
    pub spotify_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub album_type: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub image_url: String,
    pub spotify_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub name: String,
    pub duration_ms: u64,
    pub track_number: u32,
    pub explicit: bool,
    pub spotify_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedArtist {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// Genre shown on the onboarding and discovery screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedGenre {
    pub id: String,
    pub name: String,
    pub spotify_id: String,
    pub top_artists: Vec<FeaturedArtist>,
}

/// Search results of one [`CatalogKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum CatalogResults {
    Artists(Vec<Artist>),
    Albums(Vec<Album>),
    Tracks(Vec<Track>),
}

impl CatalogResults {
    pub fn kind(&self) -> CatalogKind {
        match self {
            CatalogResults::Artists(_) => CatalogKind::Artists,
            CatalogResults::Albums(_) => CatalogKind::Albums,
            CatalogResults::Tracks(_) => CatalogKind::Tracks,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CatalogResults::Artists(items) => items.len(),
            CatalogResults::Albums(items) => items.len(),
            CatalogResults::Tracks(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
