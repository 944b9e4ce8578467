use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use juke_core::GatewayError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// Longer bodies are not shown to users as error text.
const MAX_PLAIN_ERROR_LEN: usize = 200;

/// Shared HTTP client for every gateway.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `base_url`. The URL is normalised to end in `/` so
    /// request paths resolve beneath it.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("juke/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL.
    pub fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| GatewayError::Network(format!("invalid request path {path}: {e}")))
    }

    /// Resolve an endpoint built from path segments. Each segment is
    /// percent-encoded, so user-supplied values cannot add path components or
    /// a query string. The result keeps the API's trailing slash.
    pub fn segments_url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Network(format!("base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Start a request, attaching `Authorization: Token <token>` when given.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, GatewayError> {
        let url = self.url(path)?;
        Ok(self.request_url(method, url, token))
    }

    /// Same as [`Self::request`] for an already resolved URL.
    pub(crate) fn request_url(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
    ) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }
        builder
    }

    /// Send and decode a JSON body. Empty bodies decode as `null`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let value = self.send_value(builder).await?;
        serde_json::from_value(value)
            .map_err(|e| GatewayError::Network(format!("malformed response body: {e}")))
    }

    /// Send a request whose response body is ignored.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), GatewayError> {
        self.send_value(builder).await.map(|_| ())
    }

    /// Send and return the raw JSON body (`null` for 204 / empty bodies).
    pub(crate) async fn send_value(&self, builder: RequestBuilder) -> Result<Value, GatewayError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url().path(), "Response received");

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::Network(format!("malformed response body: {e}")))
    }
}

fn normalize_base_url(base_url: &str) -> anyhow::Result<Url> {
    let trimmed = base_url.trim();
    anyhow::ensure!(!trimmed.is_empty(), "backend base URL is empty");
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).with_context(|| format!("invalid backend base URL: {trimmed}"))
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        warn!("Request timed out");
        GatewayError::Network("request timed out".to_string())
    } else {
        warn!(error = %err, "Request failed");
        GatewayError::Network(err.to_string())
    }
}

async fn error_from_response(response: Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

    warn!(status = status.as_u16(), message = %message, "Request rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Auth {
            status: status.as_u16(),
            message,
        },
        _ => GatewayError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull a human message out of an error body: `detail`, then the first
/// `non_field_errors` entry, then the first field error, then a short
/// plain-text body. HTML is ignored.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            if !detail.trim().is_empty() {
                return Some(detail.to_string());
            }
        }
        if let Some(first) = value
            .get("non_field_errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(Value::as_str)
        {
            return Some(first.to_string());
        }
        if let Some(first) = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_str)
        {
            return Some(first.to_string());
        }
        if let Some(fields) = value.as_object() {
            // Field validation errors: {"username": ["A user with that username already exists."]}
            return fields
                .values()
                .filter_map(Value::as_array)
                .flat_map(|errors| errors.iter())
                .find_map(Value::as_str)
                .map(str::to_string);
        }
    }

    if trimmed.len() <= MAX_PLAIN_ERROR_LEN {
        Some(trimmed.trim_matches('"').to_string())
    } else {
        None
    }
}
