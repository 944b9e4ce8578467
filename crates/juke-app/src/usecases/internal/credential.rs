use juke_core::ports::CredentialStorePort;
use juke_core::session::Credential;
use juke_core::GatewayError;

/// Stored credential for a token-gated call.
pub(crate) async fn require_credential(
    store: &dyn CredentialStorePort,
) -> Result<Credential, GatewayError> {
    store
        .current_credential()
        .await?
        .ok_or(GatewayError::NotAuthenticated)
}

/// Token for endpoints that also serve anonymous callers.
pub(crate) async fn optional_token(
    store: &dyn CredentialStorePort,
) -> Result<Option<String>, GatewayError> {
    Ok(store.current_credential().await?.map(|c| c.token))
}
