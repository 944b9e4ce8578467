use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use juke_core::ports::{AuthGatewayPort, CredentialStorePort};
use juke_core::session::Credential;
use juke_core::GatewayError;

/// Confirm an emailed verification link.
///
/// When the backend answers with a token the user is signed in right away.
pub struct VerifyRegistration {
    store: Arc<dyn CredentialStorePort>,
    auth: Arc<dyn AuthGatewayPort>,
}

impl VerifyRegistration {
    pub fn new(store: Arc<dyn CredentialStorePort>, auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self { store, auth }
    }

    pub fn from_ports(store: Arc<dyn CredentialStorePort>, auth: Arc<dyn AuthGatewayPort>) -> Self {
        Self::new(store, auth)
    }

    pub async fn execute(
        &self,
        user_id: &str,
        timestamp: &str,
        signature: &str,
    ) -> Result<Option<Credential>, GatewayError> {
        async {
            if [user_id, timestamp, signature].iter().any(|p| p.trim().is_empty()) {
                return Err(GatewayError::Validation(
                    "Verification link is incomplete.".to_string(),
                ));
            }

            let credential = self
                .auth
                .verify_registration(user_id.trim(), timestamp.trim(), signature.trim())
                .await?;

            if let Some(credential) = &credential {
                self.store.save(credential).await?;
                info!(username = %credential.username, "Verified and signed in");
            } else {
                info!("Verified; sign-in required");
            }
            Ok(credential)
        }
        .instrument(info_span!("usecase.verify_registration.execute"))
        .await
    }
}
