use thiserror::Error;

use manga_auth::AuthError;
use manga_core::messages::{CONNECTION_ERROR, MANGA_NOT_FOUND, SESSION_EXPIRED_REDIRECTING};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised by the authenticated request wrapper (401/403 and friends).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-OK status with the best message the body offered.
    #[error("Erro HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 401 on a manga submission.
    #[error("{}", SESSION_EXPIRED_REDIRECTING)]
    Unauthorized,

    #[error("{}", MANGA_NOT_FOUND)]
    NotFound,

    /// The backend answered `success: false`, or a known failure message.
    #[error("{0}")]
    Server(String),

    #[error("invalid response: {0}")]
    Parse(String),

    #[error("cannot read upload '{path}': {reason}")]
    Upload { path: String, reason: String },
}

impl ApiError {
    /// Text for a notification. Transport and parse failures, which carry
    /// nothing a reader can act on, use `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http(error) if error.is_connect() || error.is_timeout() => {
                CONNECTION_ERROR.to_string()
            }
            Self::Http(_) | Self::Parse(_) | Self::Upload { .. } => fallback.to_string(),
            Self::Auth(AuthError::Http(_)) => CONNECTION_ERROR.to_string(),
            other => other.to_string(),
        }
    }

    /// True when the session was rejected and has already been cleared.
    pub const fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Auth(AuthError::SessionExpired { .. })
        )
    }
}
