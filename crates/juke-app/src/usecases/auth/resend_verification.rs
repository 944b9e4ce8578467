use std::sync::Arc;

use tracing::{info_span, Instrument};

use juke_core::ports::AuthGatewayPort;
use juke_core::GatewayError;

/// Ask the backend to send the account verification email again.
pub struct ResendVerification {
    auth: Arc<dyn AuthGatewayPort>,
}

impl ResendVerification {
    pub fn new(auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self { auth }
    }

    pub fn from_ports(auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self::new(auth)
    }

    pub async fn execute(&self, email: &str) -> Result<String, GatewayError> {
        let email = email.trim();
        async {
            if email.is_empty() {
                return Err(GatewayError::Validation("Enter your email address.".to_string()));
            }
            self.auth.resend_verification(email).await
        }
        .instrument(info_span!("usecase.resend_verification.execute"))
        .await
    }
}
