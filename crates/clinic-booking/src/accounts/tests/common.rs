use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::accounts::domain::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, User, UserId,
};
use crate::accounts::forms::SignUpForm;
use crate::accounts::service::AuthService;
use crate::accounts::session::{
    InMemorySessionStore, SessionError, SessionManager, SessionStore, TOKEN_KEY,
};
use crate::gateway::{AuthGateway, GatewayError, InMemoryBackend};

pub(super) fn patient() -> User {
    User {
        id: UserId(41),
        name: "Ana Torres".to_string(),
        email: "ana@example.com".to_string(),
        role: Role::Patient,
    }
}

pub(super) fn sign_up_form() -> SignUpForm {
    SignUpForm {
        name: "Ana Torres".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        role: Role::Patient,
    }
}

pub(super) fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub(super) fn build_service() -> (
    AuthService<InMemoryBackend, InMemorySessionStore>,
    InMemoryBackend,
    InMemorySessionStore,
) {
    let backend = InMemoryBackend::new();
    let store = InMemorySessionStore::default();
    let session = Arc::new(SessionManager::new(Arc::new(store.clone())));
    let service = AuthService::new(Arc::new(backend.clone()), session);
    (service, backend, store)
}

/// Gateway that answers every call with the same failure.
pub(super) struct FailingGateway(pub(super) GatewayError);

impl AuthGateway for FailingGateway {
    fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        Err(self.0.clone())
    }

    fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse, GatewayError> {
        Err(self.0.clone())
    }
}

pub(super) fn failing_service(
    error: GatewayError,
) -> AuthService<FailingGateway, InMemorySessionStore> {
    let session = Arc::new(SessionManager::new(Arc::new(
        InMemorySessionStore::default(),
    )));
    AuthService::new(Arc::new(FailingGateway(error)), session)
}

/// Store whose writes always fail.
pub(super) struct ReadOnlyStore;

impl SessionStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, SessionError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
        Err(SessionError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read only",
        )))
    }

    fn remove(&self, _key: &str) -> Result<(), SessionError> {
        Ok(())
    }
}

/// In-memory store that can be switched to reject token writes only.
#[derive(Default)]
pub(super) struct TokenWriteFailure {
    pub(super) inner: InMemorySessionStore,
    failing: AtomicBool,
}

impl TokenWriteFailure {
    pub(super) fn start_failing(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl SessionStore for TokenWriteFailure {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        if key == TOKEN_KEY && self.failing.load(Ordering::SeqCst) {
            return Err(SessionError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.inner.remove(key)
    }
}
