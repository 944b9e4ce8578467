//! Juke World (globe) models.

use serde::{Deserialize, Serialize};

use crate::profile::MusicProfile;

/// Default point budget for a globe query.
pub const DEFAULT_GLOBE_LIMIT: u32 = 5000;

/// A profile plotted on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobePoint {
    pub id: i64,
    pub username: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub clout: f64,
    #[serde(default)]
    pub top_genre: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Geo-bounded globe query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeQuery {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub zoom: f64,
    pub limit: u32,
}

impl GlobeQuery {
    /// Whole-world query at the given zoom.
    pub fn world(zoom: f64) -> Self {
        Self {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lng: -180.0,
            max_lng: 180.0,
            zoom,
            limit: DEFAULT_GLOBE_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// One page of online users.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OnlineUsersPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<MusicProfile>,
}

impl OnlineUsersPage {
    /// Wrap an unpaginated list.
    pub fn from_list(results: Vec<MusicProfile>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}
