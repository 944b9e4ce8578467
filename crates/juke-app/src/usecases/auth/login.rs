//! Use case for signing in
//! 登录用例

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use juke_core::ports::{AuthGatewayPort, CredentialStorePort};
use juke_core::session::Credential;
use juke_core::GatewayError;

/// Exchange username/password for a token and persist the credential.
///
/// Saving drops any onboarding marker, so the session controller re-checks
/// onboarding for every fresh login.
pub struct Login {
    store: Arc<dyn CredentialStorePort>,
    auth: Arc<dyn AuthGatewayPort>,
}

impl Login {
    pub fn new(store: Arc<dyn CredentialStorePort>, auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self { store, auth }
    }

    /// Convenience constructor for the UseCases accessor.
    pub fn from_ports(store: Arc<dyn CredentialStorePort>, auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self::new(store, auth)
    }

    pub async fn execute(&self, username: &str, password: &str) -> Result<Credential, GatewayError> {
        let username = username.trim();
        let span = info_span!("usecase.login.execute", username = %username);

        async {
            if username.is_empty() || password.is_empty() {
                return Err(GatewayError::Validation(
                    "Enter your username and password.".to_string(),
                ));
            }

            let token = self.auth.login(username, password).await?;
            let credential = Credential::new(username, token);
            self.store.save(&credential).await?;

            info!("Login succeeded");
            Ok(credential)
        }
        .instrument(span)
        .await
    }
}
