//! Listing sizes.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> usize {
    16
}

const fn default_latest_limit() -> u32 {
    10
}

const fn default_similar_limit() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Mangas per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `limit` sent to `/mangas/latest` on the home screen.
    #[serde(default = "default_latest_limit")]
    pub latest_limit: u32,

    /// Similar mangas shown on the detail screen.
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            latest_limit: default_latest_limit(),
            similar_limit: default_similar_limit(),
        }
    }
}
