//! Account registration inputs.

use serde::Serialize;

use crate::error::GatewayError;

/// Message shown after a successful registration when the server sends none.
pub const DEFAULT_REGISTRATION_MESSAGE: &str = "Check your inbox to confirm your account.";

/// New account request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
        }
    }

    /// Checks that can fail before anything is sent.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.password != self.password_confirm {
            return Err(GatewayError::Validation("Passwords do not match.".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
