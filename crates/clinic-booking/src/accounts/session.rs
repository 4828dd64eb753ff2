use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, warn};

use super::domain::User;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// Key/value storage that survives restarts of the client.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record is not valid json: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let guard = self.entries.lock().expect("session store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().expect("session store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut guard = self.entries.lock().expect("session store mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

/// Stores entries as a single JSON object on disk. A missing file reads as empty.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().expect("session file mutex poisoned");
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().expect("session file mutex poisoned");
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().expect("session file mutex poisoned");
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Signed-in user together with the bearer token the API issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Owns the process-wide session: an in-memory copy backed by a [`SessionStore`].
///
/// `load` restores a previous session at startup, `set` records a fresh sign-in, and `clear`
/// drops both the in-memory and the persisted copies.
pub struct SessionManager<S> {
    store: Arc<S>,
    current: RwLock<Option<Session>>,
}

impl<S> SessionManager<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Restore a persisted session. Both the user record and the token must be present; a
    /// corrupt or unreadable record leaves the manager signed out.
    pub fn load(&self) -> Option<User> {
        let restored = match self.read_persisted() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "failed to restore persisted session");
                None
            }
        };

        let user = restored.as_ref().map(|session| session.user.clone());
        if let Some(user) = &user {
            debug!(user_id = %user.id, "restored persisted session");
        }
        *self.current.write().expect("session lock poisoned") = restored;
        user
    }

    /// Persist and adopt a fresh sign-in. If either write fails the persisted pair is dropped,
    /// so a restart never pairs one user's record with another user's token.
    pub fn set(&self, user: User, token: String) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(&user)?;
        let written = self
            .store
            .set(USER_KEY, &encoded)
            .and_then(|()| self.store.set(TOKEN_KEY, &token));

        if let Err(err) = written {
            warn!(
                user_id = %user.id,
                error = %err,
                "failed to persist session, discarding stored copy"
            );
            for key in [USER_KEY, TOKEN_KEY] {
                if let Err(cleanup) = self.store.remove(key) {
                    warn!(key, error = %cleanup, "failed to discard stored session entry");
                }
            }
            return Err(err);
        }

        *self.current.write().expect("session lock poisoned") = Some(Session { user, token });
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().expect("session lock poisoned") = None;
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    fn read_persisted(&self) -> Result<Option<Session>, SessionError> {
        let user = self.store.get(USER_KEY)?;
        let token = self.store.get(TOKEN_KEY)?;

        match (user, token) {
            (Some(user), Some(token)) => {
                let user: User = serde_json::from_str(&user)?;
                Ok(Some(Session { user, token }))
            }
            _ => Ok(None),
        }
    }
}
