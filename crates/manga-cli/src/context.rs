use manga_api::MangaApi;
use manga_auth::DynStore;
use manga_config::MangaConfig;
use manga_core::{Page, Redirect};
use manga_views::{NotificationKind, Notifications};

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// State shared by every command handler.
pub struct AppContext {
    pub config: MangaConfig,
    pub flags: GlobalFlags,
    pub notes: Notifications,
}

impl AppContext {
    pub fn new(config: MangaConfig, flags: GlobalFlags) -> Self {
        Self {
            config,
            flags,
            notes: Notifications::new(),
        }
    }

    pub fn api(&self, page: Page) -> anyhow::Result<MangaApi<DynStore>> {
        bootstrap::open_api(&self.config, page)
    }

    /// [`Self::api`] plus the token check every page load runs. A refused
    /// token is reported and the command goes on logged out.
    pub async fn open_page(&self, page: Page) -> anyhow::Result<MangaApi<DynStore>> {
        let mut api = self.api(page)?;
        let verification = api.auth_mut().verify_token().await;
        self.report_redirect(verification.redirect());
        Ok(api)
    }

    /// Fail the command when the last toast raised was an error.
    pub fn ensure_no_error(&self) -> anyhow::Result<()> {
        match self.notes.current() {
            Some(note) if note.kind == NotificationKind::Error => {
                anyhow::bail!("{}", note.message)
            }
            _ => Ok(()),
        }
    }

    /// A terminal has no page to go to; say where the browser would.
    pub fn report_redirect(&self, redirect: Option<Redirect>) {
        let Some(redirect) = redirect else {
            return;
        };
        if self.flags.verbose {
            eprintln!("-> {} (after {} ms)", redirect.to, redirect.after_ms);
        } else if !self.flags.quiet {
            eprintln!("-> {}", redirect.to);
        }
    }

    /// Print every toast raised so far to stderr.
    pub fn flush_notifications(&mut self) {
        for note in self.notes.drain() {
            if self.flags.quiet && note.kind != NotificationKind::Error {
                continue;
            }
            let tag = match note.kind {
                NotificationKind::Info => "info",
                NotificationKind::Success => "ok",
                NotificationKind::Error => "error",
            };
            eprintln!("[{tag}] {}", note.message);
        }
    }
}
