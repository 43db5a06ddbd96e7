//! Session persistence configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// Where the session token and user blob are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Keyring => "keyring",
            Self::Memory => "memory",
        })
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                field: "storage.backend".into(),
                reason: format!("unknown backend '{other}' (expected file, keyring or memory)"),
            }),
        }
    }
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_user_key() -> String {
    "user".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend. Empty means `~/.sitemanga`.
    #[serde(default)]
    pub dir: String,

    #[serde(default = "default_token_key")]
    pub token_key: String,

    #[serde(default = "default_user_key")]
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: String::new(),
            token_key: default_token_key(),
            user_key: default_user_key(),
        }
    }
}

impl StorageConfig {
    /// Resolved directory for the file backend.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".sitemanga"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Keyring".parse::<StorageBackend>().unwrap(), StorageBackend::Keyring);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/sm".into(),
            ..StorageConfig::default()
        };
        assert_eq!(config.resolved_dir(), Some(PathBuf::from("/tmp/sm")));
    }
}
