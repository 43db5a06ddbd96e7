//! # manga-config
//!
//! Layered configuration loading for the SiteManga client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITEMANGA_*` prefix, `__` as separator)
//! 2. Project-level `.sitemanga/config.toml`
//! 3. User-level `~/.config/sitemanga/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITEMANGA_API__BASE_URL` -> `api.base_url`,
//! `SITEMANGA_STORAGE__BACKEND` -> `storage.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use manga_config::MangaConfig;
//!
//! let config = MangaConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod catalog;
mod error;
mod reader;
mod storage;

pub use api::ApiConfig;
pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use reader::{ReaderConfig, UiConfig};
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".sitemanga/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MangaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl MangaConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SITEMANGA_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sitemanga").join("config.toml"))
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("api.base_url", &self.api.base_url),
            ("api.server_url", &self.api.server_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }
        if self.catalog.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
