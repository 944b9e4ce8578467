use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::instrument;

use juke_core::catalog::{Album, Artist, CatalogKind, FeaturedGenre, Track};
use juke_core::ports::CatalogGatewayPort;
use juke_core::GatewayError;

use super::client::ApiClient;
use super::dto::{AlbumDto, ArtistDto, FeaturedGenreDto, Paginated, TrackDto};

const FEATURED_GENRES_PATH: &str = "api/v1/genres/featured/";

pub struct HttpCatalogGateway {
    client: ApiClient,
}

impl HttpCatalogGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/{kind}/?q=<query>&external=true`, first page only.
    async fn search<D, T>(
        &self,
        kind: CatalogKind,
        token: &str,
        query: &str,
    ) -> Result<Vec<T>, GatewayError>
    where
        D: DeserializeOwned + Send,
        T: From<D> + Send,
    {
        let path = format!("api/v1/{}/", kind.path_segment());
        let builder = self
            .client
            .request(Method::GET, &path, Some(token))?
            .query(&[("q", query.trim()), ("external", "true")]);
        let page: Paginated<D> = self.client.send_json(builder).await?;
        Ok(page.results.into_iter().map(T::from).collect())
    }
}

#[async_trait]
impl CatalogGatewayPort for HttpCatalogGateway {
    #[instrument(skip(self, token))]
    async fn search_artists(&self, token: &str, query: &str) -> Result<Vec<Artist>, GatewayError> {
        self.search::<ArtistDto, Artist>(CatalogKind::Artists, token, query)
            .await
    }

    #[instrument(skip(self, token))]
    async fn search_albums(&self, token: &str, query: &str) -> Result<Vec<Album>, GatewayError> {
        self.search::<AlbumDto, Album>(CatalogKind::Albums, token, query)
            .await
    }

    #[instrument(skip(self, token))]
    async fn search_tracks(&self, token: &str, query: &str) -> Result<Vec<Track>, GatewayError> {
        self.search::<TrackDto, Track>(CatalogKind::Tracks, token, query)
            .await
    }

    #[instrument(skip_all)]
    async fn featured_genres(&self, token: &str) -> Result<Vec<FeaturedGenre>, GatewayError> {
        let builder = self
            .client
            .request(Method::GET, FEATURED_GENRES_PATH, Some(token))?;
        let genres: Vec<FeaturedGenreDto> = self.client.send_json(builder).await?;
        Ok(genres.into_iter().map(FeaturedGenre::from).collect())
    }
}
