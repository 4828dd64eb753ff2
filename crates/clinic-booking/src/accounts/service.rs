use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{LoginRequest, User};
use super::forms::{FormErrors, SignUpForm};
use super::session::{SessionError, SessionManager, SessionStore};
use crate::gateway::{AuthGateway, GatewayError};
use crate::locale::Locale;

/// Sign-in, sign-up, and sign-out on top of the auth endpoints and the session manager.
pub struct AuthService<G, S> {
    gateway: Arc<G>,
    session: Arc<SessionManager<S>>,
}

impl<G, S> AuthService<G, S>
where
    G: AuthGateway + 'static,
    S: SessionStore + 'static,
{
    pub fn new(gateway: Arc<G>, session: Arc<SessionManager<S>>) -> Self {
        Self { gateway, session }
    }

    pub fn session(&self) -> &Arc<SessionManager<S>> {
        &self.session
    }

    pub fn sign_in(&self, request: LoginRequest) -> Result<User, AuthError> {
        info!(email = %request.email, "signing in");

        let response = self.gateway.login(&request).map_err(|err| {
            warn!(email = %request.email, error = %err, "sign-in failed");
            AuthError::from_sign_in(err)
        })?;

        let (user, token) = response.into_parts();
        self.session.set(user.clone(), token)?;
        info!(user_id = %user.id, role = user.role.code(), "signed in");
        Ok(user)
    }

    /// Register a new account and sign straight into it.
    pub fn sign_up(&self, form: &SignUpForm) -> Result<User, AuthError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(AuthError::InvalidForm(errors));
        }

        let request = form.to_request();
        self.gateway.register(&request).map_err(|err| {
            warn!(email = %request.email, error = %err, "registration failed");
            AuthError::from_registration(err)
        })?;

        self.sign_in(LoginRequest {
            email: request.email,
            password: request.password,
        })
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(user) = self.session.current_user() {
            info!(user_id = %user.id, "signing out");
        }
        self.session.clear()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("cannot reach the booking server: {0}")]
    Unreachable(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no account exists for that email")]
    UnknownUser,
    #[error("sign-in rejected: {0}")]
    SignInRejected(String),
    #[error("sign-in failed")]
    SignInFailed,
    #[error("registration rejected: {0}")]
    RegistrationRejected(String),
    #[error("registration failed")]
    RegistrationFailed,
    #[error("form has invalid fields: {}", field_list(.0))]
    InvalidForm(FormErrors),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    fn from_sign_in(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(detail) => Self::Unreachable(detail),
            GatewayError::Rejected { status: 401, .. } => Self::InvalidCredentials,
            GatewayError::Rejected { status: 404, .. } => Self::UnknownUser,
            GatewayError::Rejected {
                message: Some(message),
                ..
            } => Self::SignInRejected(message),
            GatewayError::Rejected { message: None, .. } => Self::SignInFailed,
        }
    }

    fn from_registration(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(detail) => Self::Unreachable(detail),
            GatewayError::Rejected {
                message: Some(message),
                ..
            } => Self::RegistrationRejected(message),
            GatewayError::Rejected { message: None, .. } => Self::RegistrationFailed,
        }
    }

    /// Text for an alert dialog. Server-provided messages are passed through unchanged.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Unreachable(_), Locale::English) => {
                "Cannot connect to the server. Check that the backend is running".to_string()
            }
            (Self::Unreachable(_), Locale::Spanish) => {
                "No se puede conectar al servidor. Verifica que el backend esté corriendo"
                    .to_string()
            }
            (Self::InvalidCredentials, Locale::English) => "Incorrect email or password".to_string(),
            (Self::InvalidCredentials, Locale::Spanish) => {
                "Email o contraseña incorrectos".to_string()
            }
            (Self::UnknownUser, Locale::English) => "User not found. Do you need to sign up?".to_string(),
            (Self::UnknownUser, Locale::Spanish) => {
                "Usuario no encontrado. ¿Necesitas registrarte?".to_string()
            }
            (Self::SignInRejected(message), _) | (Self::RegistrationRejected(message), _) => {
                message.clone()
            }
            (Self::SignInFailed, Locale::English) | (Self::Session(_), Locale::English) => {
                "Could not sign in".to_string()
            }
            (Self::SignInFailed, Locale::Spanish) | (Self::Session(_), Locale::Spanish) => {
                "Error al iniciar sesión".to_string()
            }
            (Self::RegistrationFailed, Locale::English) => "Could not sign up".to_string(),
            (Self::RegistrationFailed, Locale::Spanish) => "Error al registrarse".to_string(),
            (Self::InvalidForm(errors), _) => errors
                .errors()
                .map(|error| error.message(locale))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn field_list(errors: &FormErrors) -> String {
    errors.fields().collect::<Vec<_>>().join(", ")
}
