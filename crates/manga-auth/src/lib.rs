//! # manga-auth
//!
//! Authentication for the SiteManga client.
//!
//! Persists the session through a [`KeyValueStore`] (file, OS keychain, or
//! memory), runs the login/register/verify/logout flows against the backend,
//! derives the header affordances from the session, and wraps requests with
//! the bearer token, logging out on 401/403.

pub mod client;
pub mod error;
pub mod fetch;
pub mod nav;
pub mod session_store;
pub mod storage;

pub use client::{AuthClient, AuthOutcome, Verification};
pub use error::AuthError;
pub use fetch::{RequestBody, RequestOptions};
pub use nav::{NavAffordances, WelcomeBanner};
pub use session_store::SessionStore;
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore};

use manga_config::{StorageBackend, StorageConfig};

/// A store picked at runtime from configuration.
pub type DynStore = Box<dyn KeyValueStore + Send + Sync>;

/// Open the session store the configuration asks for.
///
/// # Errors
///
/// Returns [`AuthError::Storage`] when the file backend has no usable
/// directory.
pub fn open_store(config: &StorageConfig) -> Result<SessionStore<DynStore>, AuthError> {
    let backend: DynStore = match config.backend {
        StorageBackend::File => {
            let dir = config
                .resolved_dir()
                .ok_or_else(|| AuthError::Storage("home directory not found".into()))?;
            Box::new(FileStore::new(dir))
        }
        StorageBackend::Keyring => Box::new(KeyringStore::default()),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    Ok(SessionStore::with_keys(
        backend,
        config.token_key.as_str(),
        config.user_key.as_str(),
    ))
}
