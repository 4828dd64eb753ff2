//! Accounts: form checks, the persisted session, and the auth workflow.

pub mod domain;
pub mod forms;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, User, UserId,
};
pub use forms::{
    validate_email, validate_name, validate_password, validate_password_match, FieldError,
    FormErrors, SignInForm, SignUpForm,
};
pub use service::{AuthError, AuthService};
pub use session::{
    FileSessionStore, InMemorySessionStore, Session, SessionError, SessionManager, SessionStore,
};
