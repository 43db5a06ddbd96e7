//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_server_url() -> String {
    "http://localhost:4000".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_upload_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// REST base URL, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin that serves `/uploads/` assets.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for multipart manga submissions.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub const fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:4000/api");
        assert_eq!(config.server_url, "http://localhost:4000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.upload_timeout(), Duration::from_secs(300));
    }
}
