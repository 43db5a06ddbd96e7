use anyhow::Context;

use manga_api::MangaApi;
use manga_auth::{AuthClient, DynStore};
use manga_config::MangaConfig;
use manga_core::Page;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<MangaConfig> {
    MangaConfig::load_with_dotenv().context("failed to load sitemanga configuration")
}

/// Open the configured session store and build an API client on it.
///
/// `page` is the screen the command stands in for; it decides where a
/// logout sends the user.
pub fn open_api(config: &MangaConfig, page: Page) -> anyhow::Result<MangaApi<DynStore>> {
    let store = manga_auth::open_store(&config.storage).with_context(|| {
        format!("failed to open '{}' session storage", config.storage.backend)
    })?;
    let auth = AuthClient::new(&config.api, store)
        .context("failed to build HTTP client")?
        .at_page(page);
    tracing::debug!(base_url = %config.api.base_url, %page, "api client ready");
    Ok(MangaApi::new(auth, &config.api))
}
