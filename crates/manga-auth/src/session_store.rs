//! Persisted session, on top of a [`KeyValueStore`].

use manga_core::{Session, User};

use crate::error::AuthError;
use crate::storage::KeyValueStore;

/// Reads and writes the `token` and `user` entries.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
    token_key: String,
    user_key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Use the default `token`/`user` keys.
    pub fn new(backend: S) -> Self {
        Self::with_keys(backend, "token", "user")
    }

    pub fn with_keys(backend: S, token_key: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            backend,
            token_key: token_key.into(),
            user_key: user_key.into(),
        }
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Read both halves. A user blob that does not parse is dropped.
    ///
    /// # Errors
    ///
    /// Returns the backend error when an entry cannot be read.
    pub fn load(&self) -> Result<Session, AuthError> {
        let token = self.backend.get(&self.token_key)?;
        let user = match self.backend.get(&self.user_key)? {
            Some(raw) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(error) => {
                    tracing::warn!(%error, "stored user is not valid JSON; ignoring it");
                    None
                }
            },
            None => None,
        };
        Ok(Session { token, user })
    }

    /// Persist a fresh login.
    ///
    /// # Errors
    ///
    /// Returns the backend error when an entry cannot be written.
    pub fn set(&self, token: &str, user: &User) -> Result<(), AuthError> {
        self.backend.set(&self.token_key, token)?;
        self.set_user(user)
    }

    /// Replace the stored user, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the entry cannot be written.
    pub fn set_user(&self, user: &User) -> Result<(), AuthError> {
        let blob = serde_json::to_string(user)
            .map_err(|e| AuthError::Storage(format!("serialize user: {e}")))?;
        self.backend.set(&self.user_key, &blob)
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns the first backend error; the other key is still attempted.
    pub fn clear(&self) -> Result<(), AuthError> {
        let token = self.backend.remove(&self.token_key);
        let user = self.backend.remove(&self.user_key);
        token.and(user)
    }
}
