//! Integration tests for the provider chain.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use manga_config::{MangaConfig, StorageBackend};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://mangas.example/api"
server_url = "https://mangas.example"
request_timeout_secs = 5

[storage]
backend = "memory"
token_key = "sm_token"

[catalog]
page_size = 24
"#,
        )?;

        let config: MangaConfig = Figment::from(Serialized::defaults(MangaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://mangas.example/api");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.api.upload_timeout_secs, 300);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.token_key, "sm_token");
        assert_eq!(config.storage.user_key, "user");
        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.latest_limit, 10);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[reader]
placeholder_pages = 3
"#,
        )?;
        jail.set_env("SITEMANGA_READER__PLACEHOLDER_PAGES", "8");
        jail.set_env("SITEMANGA_UI__LOGIN_REDIRECT_MS", "0");

        let config: MangaConfig = Figment::from(Serialized::defaults(MangaConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SITEMANGA_").split("__"))
            .extract()?;

        assert_eq!(config.reader.placeholder_pages, 8);
        assert_eq!(config.ui.login_redirect_ms, 0);
        assert_eq!(config.ui.session_redirect_ms, 1500);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sitemanga")?;
        jail.create_file(
            ".sitemanga/config.toml",
            r#"
[api]
base_url = "http://127.0.0.1:9999/api"
"#,
        )?;

        let config = MangaConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9999/api");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEMANGA_CATALOG__PAGE_SIZE", "0");
        let err = MangaConfig::load().unwrap_err();
        assert!(err.to_string().contains("catalog.page_size"));
        Ok(())
    });
}
