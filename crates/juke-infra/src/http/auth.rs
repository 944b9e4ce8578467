use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use juke_core::auth::{Registration, DEFAULT_REGISTRATION_MESSAGE};
use juke_core::ports::AuthGatewayPort;
use juke_core::session::Credential;
use juke_core::GatewayError;

use super::client::ApiClient;
use super::dto::{
    DetailResponse, EmailRequest, LoginRequest, LoginResponse, VerifyRequest, VerifyResponse,
};

const LOGIN_PATH: &str = "api/v1/auth/api-auth-token/";
const REGISTER_PATH: &str = "api/v1/auth/accounts/register/";
const LOGOUT_PATH: &str = "api/v1/auth/session/logout/";
const RESEND_PATH: &str = "api/v1/auth/accounts/resend-registration/";
const VERIFY_PATH: &str = "api/v1/auth/accounts/verify-registration/";

pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGatewayPort for HttpAuthGateway {
    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<String, GatewayError> {
        let builder = self
            .client
            .request(Method::POST, LOGIN_PATH, None)?
            .json(&LoginRequest { username, password });

        // The backend answers bad credentials with a 400; treat every rejection as auth.
        let response: LoginResponse =
            self.client
                .send_json(builder)
                .await
                .map_err(|err| match err {
                    GatewayError::Server { status, message } => {
                        GatewayError::Auth { status, message }
                    }
                    other => other,
                })?;

        info!("Login accepted");
        Ok(response.token)
    }

    #[instrument(skip(self, registration), fields(username = %registration.username))]
    async fn register(&self, registration: &Registration) -> Result<String, GatewayError> {
        registration.validate()?;

        let builder = self
            .client
            .request(Method::POST, REGISTER_PATH, None)?
            .json(registration);
        let response: Option<DetailResponse> = self.client.send_json(builder).await?;

        Ok(detail_or_default(response))
    }

    #[instrument(skip_all)]
    async fn logout(&self, token: &str) -> Result<(), GatewayError> {
        let builder = self.client.request(Method::POST, LOGOUT_PATH, Some(token))?;
        self.client.send_empty(builder).await
    }

    #[instrument(skip(self))]
    async fn resend_verification(&self, email: &str) -> Result<String, GatewayError> {
        let builder = self
            .client
            .request(Method::POST, RESEND_PATH, None)?
            .json(&EmailRequest { email });
        let response: Option<DetailResponse> = self.client.send_json(builder).await?;

        Ok(detail_or_default(response))
    }

    #[instrument(skip(self, signature))]
    async fn verify_registration(
        &self,
        user_id: &str,
        timestamp: &str,
        signature: &str,
    ) -> Result<Option<Credential>, GatewayError> {
        let builder = self
            .client
            .request(Method::POST, VERIFY_PATH, None)?
            .json(&VerifyRequest {
                user_id,
                timestamp,
                signature,
            });
        let response: Option<VerifyResponse> = self.client.send_json(builder).await?;
        let response = response.unwrap_or_default();

        Ok(Credential::from_parts(response.username, response.token))
    }
}

fn detail_or_default(response: Option<DetailResponse>) -> String {
    response
        .and_then(|r| r.detail)
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REGISTRATION_MESSAGE.to_string())
}
