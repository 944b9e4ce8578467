//! Sign-in / sign-up form state.

use tracing::{debug, info_span, Instrument};

use juke_core::auth::Registration;
use juke_core::observable::{Observable, Subscription};

use crate::usecases::{Login, Register};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// Everything the form renders.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub is_loading: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl std::fmt::Debug for AuthFormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFormState")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_loading", &self.is_loading)
            .field("message", &self.message)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Auth form view-state.
///
/// Failures are turned into [`AuthFormState::error`] text; nothing here
/// returns an `Err`. Session changes after a successful login arrive through
/// the [`SessionController`](crate::SessionController), not through this form.
pub struct AuthForm {
    state: Observable<AuthFormState>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            state: Observable::new(AuthFormState::default()),
        }
    }

    pub fn state(&self) -> AuthFormState {
        self.state.get()
    }

    pub fn subscribe(&self) -> Subscription<AuthFormState> {
        self.state.subscribe()
    }

    pub fn update_username(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|s| s.username = value);
    }

    pub fn update_email(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|s| s.email = value);
    }

    pub fn update_password(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|s| s.password = value);
    }

    pub fn update_confirm(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|s| s.confirm = value);
    }

    pub fn toggle_mode(&self) {
        self.edit(|s| s.mode = s.mode.toggled());
    }

    /// Run login or register depending on the current mode.
    ///
    /// Ignored while a previous submit is still loading.
    pub async fn submit(&self, login: &Login, register: &Register) {
        let mut snapshot = None;
        self.state.update(|s| {
            if !s.is_loading {
                s.is_loading = true;
                s.message = None;
                s.error = None;
                snapshot = Some(s.clone());
            }
        });
        let Some(form) = snapshot else {
            debug!("Submit ignored while loading");
            return;
        };

        match form.mode {
            AuthMode::Login => self.login(login, &form).await,
            AuthMode::Register => self.register(register, &form).await,
        }
    }

    async fn login(&self, login: &Login, form: &AuthFormState) {
        let username = form.username.trim().to_string();
        let result = login
            .execute(&username, &form.password)
            .instrument(info_span!("view_state.auth_form.login"))
            .await;

        self.state.update(|s| {
            s.is_loading = false;
            match result {
                Ok(_) => {
                    s.password.clear();
                    s.message = Some(format!("Signed in as {username}"));
                }
                Err(err) => s.error = Some(err.user_message()),
            }
        });
    }

    async fn register(&self, register: &Register, form: &AuthFormState) {
        let registration = Registration::new(
            form.username.trim(),
            form.email.trim(),
            form.password.clone(),
            form.confirm.clone(),
        );
        let result = register
            .execute(&registration)
            .instrument(info_span!("view_state.auth_form.register"))
            .await;

        self.state.update(|s| {
            s.is_loading = false;
            match result {
                Ok(message) => {
                    s.mode = AuthMode::Login;
                    s.password.clear();
                    s.confirm.clear();
                    s.message = Some(message);
                }
                Err(err) => s.error = Some(err.user_message()),
            }
        });
    }

    fn edit(&self, f: impl FnOnce(&mut AuthFormState)) {
        self.state.update(|s| {
            f(s);
            s.message = None;
            s.error = None;
        });
    }
}
