use async_trait::async_trait;

use crate::auth::Registration;
use crate::error::GatewayError;
use crate::session::Credential;

/// Account endpoints of the backend.
#[async_trait]
pub trait AuthGatewayPort: Send + Sync {
    /// Exchange username/password for a token.
    ///
    /// Any rejection, the backend's 400 included, is [`GatewayError::Auth`].
    async fn login(&self, username: &str, password: &str) -> Result<String, GatewayError>;

    /// Create an account and return the confirmation message to show.
    ///
    /// Fails with [`GatewayError::Validation`] before any request when the
    /// passwords differ.
    async fn register(&self, registration: &Registration) -> Result<String, GatewayError>;

    /// Revoke the token server-side.
    async fn logout(&self, token: &str) -> Result<(), GatewayError>;

    /// Ask the backend to send the verification email again.
    async fn resend_verification(&self, email: &str) -> Result<String, GatewayError>;

    /// Confirm an email link. The backend may sign the user in directly.
    async fn verify_registration(
        &self,
        user_id: &str,
        timestamp: &str,
        signature: &str,
    ) -> Result<Option<Credential>, GatewayError>;
}
