//! Use case for creating an account
//! 注册用例

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use juke_core::auth::Registration;
use juke_core::ports::AuthGatewayPort;
use juke_core::GatewayError;

/// Create an account. Registration never signs the user in; the returned
/// message tells them to confirm their email.
pub struct Register {
    auth: Arc<dyn AuthGatewayPort>,
}

impl Register {
    pub fn new(auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self { auth }
    }

    pub fn from_ports(auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self::new(auth)
    }

    pub async fn execute(&self, registration: &Registration) -> Result<String, GatewayError> {
        let registration = Registration {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_string(),
            ..registration.clone()
        };
        let span = info_span!("usecase.register.execute", username = %registration.username);

        async {
            registration.validate()?;
            let message = self.auth.register(&registration).await?;
            info!("Registration accepted");
            Ok(message)
        }
        .instrument(span)
        .await
    }
}
