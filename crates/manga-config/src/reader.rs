//! Reader and UI timing configuration.

use serde::{Deserialize, Serialize};

const fn default_placeholder_pages() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    /// Placeholder pages shown when a chapter has no page list at all.
    #[serde(default = "default_placeholder_pages")]
    pub placeholder_pages: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            placeholder_pages: default_placeholder_pages(),
        }
    }
}

const fn default_login_redirect_ms() -> u64 {
    1200
}

const fn default_session_redirect_ms() -> u64 {
    1500
}

const fn default_register_redirect_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Delay before leaving the login/register screen after success.
    #[serde(default = "default_login_redirect_ms")]
    pub login_redirect_ms: u64,

    /// Delay before sending an expired admin session to the login screen.
    #[serde(default = "default_session_redirect_ms")]
    pub session_redirect_ms: u64,

    /// Delay before moving from a completed registration to the login screen.
    #[serde(default = "default_register_redirect_ms")]
    pub register_redirect_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            login_redirect_ms: default_login_redirect_ms(),
            session_redirect_ms: default_session_redirect_ms(),
            register_redirect_ms: default_register_redirect_ms(),
        }
    }
}
