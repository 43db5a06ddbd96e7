//! The home screen: latest releases.

use manga_api::MangaApi;
use manga_auth::KeyValueStore;
use manga_config::MangaConfig;
use manga_core::messages::MANGAS_LOAD_FAILED;

use crate::cards::MangaCard;
use crate::notify::Notifications;

#[derive(Debug, Clone, Default)]
pub struct Home {
    pub latest: Vec<MangaCard>,
}

impl Home {
    /// Fetch the latest releases. A failure leaves the grid empty and raises
    /// an error toast.
    pub async fn load<S: KeyValueStore>(
        api: &MangaApi<S>,
        config: &MangaConfig,
        notes: &mut Notifications,
    ) -> Self {
        match api.latest(config.catalog.latest_limit).await {
            Ok(mangas) => Self {
                latest: MangaCard::from_all(&mangas, &config.api.server_url),
            },
            Err(error) => {
                tracing::warn!(%error, "latest releases failed to load");
                notes.error(error.user_message(MANGAS_LOAD_FAILED));
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
