use thiserror::Error;

use manga_core::Redirect;
use manga_core::messages::SESSION_EXPIRED;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the token (401/403). The session has already been
    /// cleared; `redirect` is where the client should go next.
    #[error("{}", SESSION_EXPIRED)]
    SessionExpired { redirect: Option<Redirect> },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("session store error: {0}")]
    Storage(String),
}
