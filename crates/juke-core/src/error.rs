//! Error taxonomy shared by every port.
//!
//! Gateways and stores return these typed errors; the view-state layer turns
//! them into user-visible strings with [`GatewayError::user_message`].

use thiserror::Error;

/// Credential store errors.
///
/// 凭据存储错误类型。
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// Reading or writing the backing file failed.
    #[error("credential store io failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is corrupt or not in the expected shape.
    #[error("credential store data corrupt: {0}")]
    Corrupt(String),

    /// The session could not be encoded for storage.
    #[error("credential store serialization failed: {0}")]
    Serialize(String),
}

/// Errors surfaced by the REST gateways and the use cases built on them.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client-side validation failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No credential is stored for a token-gated call.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The server rejected the credentials (401/403, or a refused login).
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("request failed ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport failure, timeout or a body that could not be decoded.
    #[error("network error: {0}")]
    Network(String),

    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

impl GatewayError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Auth { status, .. } | GatewayError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True for 401/403-class failures, i.e. the stored token is no longer usable.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            GatewayError::Auth { .. } | GatewayError::NotAuthenticated
        )
    }

    /// Human readable message for the UI layer.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Validation(message) => message.clone(),
            GatewayError::NotAuthenticated => "Not authenticated.".to_string(),
            GatewayError::Network(_) => "Network error — check your connection.".to_string(),
            GatewayError::Store(_) => "Something went wrong.".to_string(),
            GatewayError::Auth { status, message } | GatewayError::Server { status, message } => {
                status_message(*status, message)
            }
        }
    }
}

fn status_message(status: u16, detail: &str) -> String {
    let detail = detail.trim();
    match status {
        400 if !detail.is_empty() => detail.to_string(),
        400 => "Bad request — check your input.".to_string(),
        401 => "Authentication failed. Please log in again.".to_string(),
        403 => "Access denied.".to_string(),
        404 => "Not found.".to_string(),
        429 => "Rate limited — try again shortly.".to_string(),
        500..=599 => "Server error — try again later.".to_string(),
        _ if !detail.is_empty() => detail.to_string(),
        _ => format!("Request failed with status {status}."),
    }
}
