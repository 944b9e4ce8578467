//! REST adapters.
//!
//! [`ApiClient`] owns the `reqwest` client, the normalised base URL and the
//! status-to-error mapping. Each gateway is a thin wrapper translating one
//! port onto the backend's endpoints.

mod auth;
mod catalog;
mod client;
mod dto;
mod playback;
mod profile;
mod world;

pub use auth::HttpAuthGateway;
pub use catalog::HttpCatalogGateway;
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use playback::HttpPlaybackGateway;
pub use profile::HttpProfileGateway;
pub use world::HttpWorldGateway;
