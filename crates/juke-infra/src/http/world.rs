use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use juke_core::ports::WorldGatewayPort;
use juke_core::world::{GlobePoint, GlobeQuery, OnlineUsersPage};
use juke_core::GatewayError;

use super::client::ApiClient;
use super::dto::{MaybePaginated, MusicProfileDto};

const GLOBE_PATH: &str = "api/v1/music-profiles/globe/";
const PROFILES_PATH: &str = "api/v1/music-profiles/";

pub struct HttpWorldGateway {
    client: ApiClient,
}

impl HttpWorldGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WorldGatewayPort for HttpWorldGateway {
    #[instrument(skip(self, token))]
    async fn globe_points(
        &self,
        token: Option<&str>,
        query: &GlobeQuery,
    ) -> Result<Vec<GlobePoint>, GatewayError> {
        let builder = self
            .client
            .request(Method::GET, GLOBE_PATH, token)?
            .query(query);
        self.client.send_json(builder).await
    }

    #[instrument(skip(self, token))]
    async fn online_users(
        &self,
        token: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<OnlineUsersPage, GatewayError> {
        let builder = self
            .client
            .request(Method::GET, PROFILES_PATH, token)?
            .query(&[
                ("online", "true".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]);
        let payload: MaybePaginated<MusicProfileDto> = self.client.send_json(builder).await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::client::DEFAULT_TIMEOUT;
    use mockito::Matcher;
    use serde_json::json;

    fn gateway(server: &mockito::ServerGuard) -> HttpWorldGateway {
        HttpWorldGateway::new(ApiClient::new(&server.url(), DEFAULT_TIMEOUT).unwrap())
    }

    #[tokio::test]
    async fn test_globe_points_sends_bounds_and_default_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/music-profiles/globe/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("min_lat".into(), "-90.0".into()),
                Matcher::UrlEncoded("max_lng".into(), "180.0".into()),
                Matcher::UrlEncoded("limit".into(), "5000".into()),
            ]))
            .with_status(200)
            .with_body(
                json!([{
                    "id": 1,
                    "username": "alice",
                    "lat": 38.7,
                    "lng": -9.1,
                    "clout": 0.4,
                    "top_genre": "jazz",
                    "display_name": "Alice"
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let points = gateway(&server)
            .globe_points(None, &GlobeQuery::world(1.0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].top_genre, "jazz");
        assert_eq!(points[0].location, None);
    }

    #[tokio::test]
    async fn test_online_users_paginated() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/music-profiles/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("online".into(), "true".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
                Matcher::UrlEncoded("offset".into(), "20".into()),
            ]))
            .match_header("authorization", "Token tok")
            .with_status(200)
            .with_body(r#"{"count":21,"next":null,"previous":"p","results":[{"username":"z"}]}"#)
            .create_async()
            .await;

        let page = gateway(&server)
            .online_users(Some("tok"), 10, 20)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.count, 21);
        assert_eq!(page.previous.as_deref(), Some("p"));
        assert_eq!(page.results[0].username, "z");
    }

    #[tokio::test]
    async fn test_online_users_bare_list_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/music-profiles/")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"[{"username":"a"},{"username":"b"}]"#)
            .create_async()
            .await;

        let page = gateway(&server).online_users(None, 10, 0).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.count, 2);
    }
}
