use async_trait::async_trait;

use crate::catalog::{Album, Artist, FeaturedGenre, Track};
use crate::error::GatewayError;

/// Catalog search, backed by the server's external (Spotify) lookup.
#[async_trait]
pub trait CatalogGatewayPort: Send + Sync {
    async fn search_artists(&self, token: &str, query: &str) -> Result<Vec<Artist>, GatewayError>;

    async fn search_albums(&self, token: &str, query: &str) -> Result<Vec<Album>, GatewayError>;

    async fn search_tracks(&self, token: &str, query: &str) -> Result<Vec<Track>, GatewayError>;

    async fn featured_genres(&self, token: &str) -> Result<Vec<FeaturedGenre>, GatewayError>;
}
