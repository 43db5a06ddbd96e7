//! The admin screen: manga list and modals, plus user management.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use manga_api::{ApiError, MangaApi};
use manga_auth::{AuthError, KeyValueStore};
use manga_config::{MangaConfig, UiConfig};
use manga_core::messages::{
    CANNOT_MODIFY_SELF, LOGIN_REQUIRED_TO_CREATE, MANGA_CREATED, MANGA_DELETE_FAILED,
    MANGA_DELETED, MANGA_SAVE_FAILED, MANGA_UPDATED, MANGAS_LOAD_FAILED, ROLE_UPDATE_FAILED,
    ROLE_UPDATED, SESSION_EXPIRED_REDIRECTING, USER_DELETE_FAILED, USER_DELETED, USERS_LOAD_FAILED,
};
use manga_core::{CoreError, Manga, Page, Redirect, Role, StatusKind, User};

use super::form::MangaForm;
use crate::cards::MangaCard;
use crate::notify::Notifications;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Filter buttons above the manga grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MangaFilter {
    #[default]
    All,
    Latest,
    Ongoing,
    Completed,
}

impl MangaFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Latest => "latest",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, manga: &Manga) -> bool {
        match self {
            Self::All => true,
            Self::Latest => manga.is_latest,
            Self::Ongoing => StatusKind::Ongoing.matches(&manga.status),
            Self::Completed => StatusKind::Completed.matches(&manga.status),
        }
    }
}

impl fmt::Display for MangaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MangaFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "latest" => Ok(Self::Latest),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::InvalidValue {
                field: "filter".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// The create/edit modal. Opening one replaces whatever was open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MangaModal {
    #[default]
    Closed,
    Open(MangaForm),
}

/// Delete confirmation for a manga.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmModal {
    #[default]
    Closed,
    Open(i64),
}

/// Role editor or delete confirmation for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserModal {
    #[default]
    Closed,
    EditRole { user_id: i64, role: Role },
    ConfirmDelete(i64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MangaStats {
    pub total: usize,
    pub chapters: usize,
    pub latest: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub admins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCard {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar: char,
    pub role: Role,
    pub role_label: &'static str,
    /// The signed-in admin; shown without edit/delete actions.
    pub is_current: bool,
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Admin screen state. Owns the API client for the lifetime of the screen.
pub struct AdminPanel<S> {
    api: MangaApi<S>,
    ui: UiConfig,
    server_url: String,
    mangas: Vec<Manga>,
    users: Vec<User>,
    search: String,
    filter: MangaFilter,
    manga_modal: MangaModal,
    confirm_modal: ConfirmModal,
    user_modal: UserModal,
}

impl<S: KeyValueStore> AdminPanel<S> {
    /// Verify the stored session and load the catalog.
    ///
    /// # Errors
    ///
    /// A redirect to the login page when the visitor is not a logged-in
    /// admin. No catalog request is made in that case.
    pub async fn bootstrap(
        mut api: MangaApi<S>,
        config: &MangaConfig,
        notes: &mut Notifications,
    ) -> Result<Self, Redirect> {
        let verification = api.auth_mut().verify_token().await;
        if !api.auth().is_admin() {
            tracing::debug!(?verification, "admin panel refused: not an admin session");
            return Err(Redirect::immediate(Page::Login));
        }
        let mut panel = Self {
            api,
            ui: config.ui.clone(),
            server_url: config.api.server_url.clone(),
            mangas: Vec::new(),
            users: Vec::new(),
            search: String::new(),
            filter: MangaFilter::All,
            manga_modal: MangaModal::Closed,
            confirm_modal: ConfirmModal::Closed,
            user_modal: UserModal::Closed,
        };
        panel.load_mangas(notes).await;
        Ok(panel)
    }

    pub const fn api(&self) -> &MangaApi<S> {
        &self.api
    }

    pub fn into_api(self) -> MangaApi<S> {
        self.api
    }

    /// Toast the failure; pass on the redirect of an ended session.
    fn report(error: &ApiError, fallback: &str, notes: &mut Notifications) -> Option<Redirect> {
        tracing::warn!(%error, "admin action failed");
        notes.error(error.user_message(fallback));
        match error {
            ApiError::Auth(AuthError::SessionExpired { redirect }) => *redirect,
            _ => None,
        }
    }

    fn session_redirect(&self) -> Redirect {
        Redirect::delayed(Page::Login, self.ui.session_redirect_ms)
    }

    // -----------------------------------------------------------------------
    // Mangas
    // -----------------------------------------------------------------------

    /// Refetch the full list. A failure keeps the previous list.
    pub async fn load_mangas(&mut self, notes: &mut Notifications) {
        match self.api.list_mangas().await {
            Ok(mangas) => self.mangas = mangas,
            Err(error) => {
                Self::report(&error, MANGAS_LOAD_FAILED, notes);
            }
        }
    }

    pub fn mangas(&self) -> &[Manga] {
        &self.mangas
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub const fn set_filter(&mut self, filter: MangaFilter) {
        self.filter = filter;
    }

    pub const fn filter(&self) -> MangaFilter {
        self.filter
    }

    /// Mangas passing both the search box and the filter button.
    pub fn visible_mangas(&self) -> Vec<&Manga> {
        let needle = self.search.trim().to_lowercase();
        self.mangas
            .iter()
            .filter(|manga| manga.matches_search(&needle) && self.filter.matches(manga))
            .collect()
    }

    pub fn cards(&self) -> Vec<MangaCard> {
        self.visible_mangas()
            .into_iter()
            .map(|manga| MangaCard::new(manga, &self.server_url))
            .collect()
    }

    /// Totals over the whole list, ignoring search and filter.
    pub fn stats(&self) -> MangaStats {
        MangaStats {
            total: self.mangas.len(),
            chapters: self.mangas.iter().map(Manga::chapter_count).sum(),
            latest: self.mangas.iter().filter(|m| m.is_latest).count(),
        }
    }

    pub fn open_create(&mut self) {
        self.manga_modal = MangaModal::Open(MangaForm::create());
    }

    /// Open the editor for a listed manga. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: i64) -> bool {
        let Some(manga) = self.mangas.iter().find(|m| m.id == id) else {
            return false;
        };
        self.manga_modal = MangaModal::Open(MangaForm::for_edit(manga));
        true
    }

    /// Close the modal and discard the draft.
    pub fn close_modal(&mut self) {
        self.manga_modal = MangaModal::Closed;
    }

    pub const fn manga_modal(&self) -> &MangaModal {
        &self.manga_modal
    }

    pub const fn form_mut(&mut self) -> Option<&mut MangaForm> {
        match &mut self.manga_modal {
            MangaModal::Open(form) => Some(form),
            MangaModal::Closed => None,
        }
    }

    /// Submit the open form.
    ///
    /// Nothing is sent without a session or while the form has a validation
    /// error. On success the modal closes and the list is reloaded.
    pub async fn submit(&mut self, notes: &mut Notifications) -> Option<Redirect> {
        let MangaModal::Open(form) = &self.manga_modal else {
            return None;
        };
        if !self.api.auth().is_logged_in() {
            notes.error(LOGIN_REQUIRED_TO_CREATE);
            return Some(self.session_redirect());
        }
        if let Err(error) = form.validate() {
            notes.error(error.to_string());
            return None;
        }

        let editing = form.is_edit();
        match self.api.submit_manga(form.clone().into_submission()).await {
            Ok(()) => {
                self.close_modal();
                self.load_mangas(notes).await;
                notes.success(if editing { MANGA_UPDATED } else { MANGA_CREATED });
                None
            }
            Err(ApiError::Unauthorized) => {
                notes.error(SESSION_EXPIRED_REDIRECTING);
                Some(self.session_redirect())
            }
            Err(error) => Self::report(&error, MANGA_SAVE_FAILED, notes),
        }
    }

    /// Ask before deleting a listed manga.
    pub fn confirm_delete(&mut self, id: i64) -> bool {
        if !self.mangas.iter().any(|m| m.id == id) {
            return false;
        }
        self.confirm_modal = ConfirmModal::Open(id);
        true
    }

    pub const fn close_confirm(&mut self) {
        self.confirm_modal = ConfirmModal::Closed;
    }

    pub const fn confirm_modal(&self) -> ConfirmModal {
        self.confirm_modal
    }

    /// Delete the manga awaiting confirmation, then reload.
    pub async fn delete_confirmed(&mut self, notes: &mut Notifications) -> Option<Redirect> {
        let ConfirmModal::Open(id) = self.confirm_modal else {
            return None;
        };
        match self.api.delete_manga(id).await {
            Ok(()) => {
                self.close_confirm();
                self.load_mangas(notes).await;
                notes.success(MANGA_DELETED);
                None
            }
            Err(error) => Self::report(&error, MANGA_DELETE_FAILED, notes),
        }
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn load_users(&mut self, notes: &mut Notifications) -> Option<Redirect> {
        match self.api.list_users().await {
            Ok(users) => {
                self.users = users;
                None
            }
            Err(error) => Self::report(&error, USERS_LOAD_FAILED, notes),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn current_user_id(&self) -> Option<i64> {
        self.api.auth().user().map(|user| user.id)
    }

    pub fn user_cards(&self) -> Vec<UserCard> {
        let current = self.current_user_id();
        self.users
            .iter()
            .map(|user| UserCard {
                id: user.id,
                name: user.name.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
                avatar: user.avatar_initial(),
                role: user.role.clone(),
                role_label: user.role.label(),
                is_current: Some(user.id) == current,
            })
            .collect()
    }

    pub fn user_stats(&self) -> UserStats {
        UserStats {
            total: self.users.len(),
            admins: self.users.iter().filter(|u| u.is_admin()).count(),
        }
    }

    /// The user `id`, unless it is the signed-in account.
    fn other_user(&self, id: i64, notes: &mut Notifications) -> Option<&User> {
        if self.current_user_id() == Some(id) {
            notes.error(CANNOT_MODIFY_SELF);
            return None;
        }
        self.users.iter().find(|u| u.id == id)
    }

    pub fn edit_user(&mut self, id: i64, notes: &mut Notifications) -> bool {
        let Some(user) = self.other_user(id, notes) else {
            return false;
        };
        self.user_modal = UserModal::EditRole {
            user_id: user.id,
            role: user.role.clone(),
        };
        true
    }

    pub fn confirm_delete_user(&mut self, id: i64, notes: &mut Notifications) -> bool {
        let Some(user) = self.other_user(id, notes) else {
            return false;
        };
        self.user_modal = UserModal::ConfirmDelete(user.id);
        true
    }

    /// Pick the role in the open editor.
    pub fn select_role(&mut self, selected: Role) {
        if let UserModal::EditRole { role, .. } = &mut self.user_modal {
            *role = selected;
        }
    }

    pub fn close_user_modal(&mut self) {
        self.user_modal = UserModal::Closed;
    }

    pub const fn user_modal(&self) -> &UserModal {
        &self.user_modal
    }

    /// Save the role picked in the editor, then reload the users.
    pub async fn submit_role(&mut self, notes: &mut Notifications) -> Option<Redirect> {
        let UserModal::EditRole { user_id, role } = &self.user_modal else {
            return None;
        };
        let (user_id, role) = (*user_id, role.clone());
        match self.api.update_role(user_id, &role).await {
            Ok(message) => {
                notes.success(message.unwrap_or_else(|| ROLE_UPDATED.to_string()));
                self.close_user_modal();
                self.load_users(notes).await
            }
            Err(error) => Self::report(&error, ROLE_UPDATE_FAILED, notes),
        }
    }

    /// Delete the user awaiting confirmation, then reload the users.
    pub async fn delete_user_confirmed(&mut self, notes: &mut Notifications) -> Option<Redirect> {
        let &UserModal::ConfirmDelete(user_id) = &self.user_modal else {
            return None;
        };
        match self.api.delete_user(user_id).await {
            Ok(message) => {
                notes.success(message.unwrap_or_else(|| USER_DELETED.to_string()));
                self.close_user_modal();
                self.load_users(notes).await
            }
            Err(error) => Self::report(&error, USER_DELETE_FAILED, notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn manga(status: &str, latest: bool) -> Manga {
        serde_json::from_value(serde_json::json!({
            "id": 1, "title": "t", "status": status, "isLatest": latest
        }))
        .unwrap()
    }

    #[rstest]
    #[case(MangaFilter::All, "Pausado", false, true)]
    #[case(MangaFilter::Latest, "Pausado", true, true)]
    #[case(MangaFilter::Latest, "Pausado", false, false)]
    #[case(MangaFilter::Ongoing, "EM ANDAMENTO", false, true)]
    #[case(MangaFilter::Ongoing, "hiato", false, false)]
    #[case(MangaFilter::Completed, "finalizado", false, true)]
    fn filter_buttons(
        #[case] filter: MangaFilter,
        #[case] status: &str,
        #[case] latest: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(&manga(status, latest)), expected);
    }

    #[test]
    fn filter_parses_from_cli_input() {
        assert_eq!("Completed".parse::<MangaFilter>().unwrap(), MangaFilter::Completed);
        assert!("paused".parse::<MangaFilter>().is_err());
    }
}
