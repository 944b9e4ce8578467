//! Onboarding wizard answers.
//!
//! The wizard collects a handful of taste questions; completing it PATCHes the
//! user's music profile with the answers plus the completion timestamp.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::session::ONBOARDING_COMPLETED_AT_KEY;

/// A city picked on the location step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Answers gathered by the onboarding wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub favorite_genres: Vec<String>,
    pub hated_genres: Vec<String>,
    /// Spotify ids of favourite artists.
    pub favorite_artists: Vec<String>,
    /// Free-text location name, used when no city was picked.
    pub location_name: Option<String>,
    pub city: Option<CityLocation>,
    /// Optional answers (mood, decade, listening style...) stored under `custom_data`.
    pub extras: BTreeMap<String, String>,
}

impl OnboardingProfile {
    /// Build the profile PATCH body, stamped with `completed_at`.
    pub fn to_patch(&self, completed_at: &str) -> Value {
        let location = self
            .city
            .as_ref()
            .map(|city| city.name.clone())
            .or_else(|| self.location_name.clone())
            .unwrap_or_default();

        let mut custom_data = Map::new();
        custom_data.insert("hated_genres".to_string(), json!(self.hated_genres));
        for (key, value) in &self.extras {
            custom_data.insert(key.clone(), Value::String(value.clone()));
        }

        let mut body = Map::new();
        body.insert("favorite_genres".to_string(), json!(self.favorite_genres));
        body.insert("favorite_artists".to_string(), json!(self.favorite_artists));
        body.insert("location".to_string(), Value::String(location));
        if let Some(city) = &self.city {
            body.insert("city_lat".to_string(), json!(city.lat));
            body.insert("city_lng".to_string(), json!(city.lng));
        }
        body.insert(
            ONBOARDING_COMPLETED_AT_KEY.to_string(),
            Value::String(completed_at.to_string()),
        );
        body.insert("custom_data".to_string(), Value::Object(custom_data));
        Value::Object(body)
    }
}
