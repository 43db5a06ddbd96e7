//! The REST client.

use std::time::Duration;

use serde_json::json;

use manga_auth::{AuthClient, KeyValueStore, RequestOptions};
use manga_config::ApiConfig;
use manga_core::messages::{
    CHAPTERS_LOAD_FAILED, FAVORITE_FAILED, MANGA_DELETE_FAILED, MANGA_LOAD_FAILED,
    MANGAS_LOAD_FAILED, PAGES_LOAD_FAILED, ROLE_UPDATE_FAILED, USER_DELETE_FAILED,
};
use manga_core::responses::{Envelope, ListPayload, PagesPayload, UsersResponse};
use manga_core::{Chapter, Manga, PageRef, Role, User};

use crate::error::ApiError;
use crate::http::{body_message, check_status, parse};
use crate::upload::MangaSubmission;

/// Typed access to every backend endpoint the client uses.
///
/// Public reads go out with whatever token the session holds; admin calls go
/// through [`AuthClient::fetch`] so a rejected token ends the session.
pub struct MangaApi<S> {
    auth: AuthClient<S>,
    upload_timeout: Duration,
}

impl<S: KeyValueStore> MangaApi<S> {
    pub fn new(auth: AuthClient<S>, api: &ApiConfig) -> Self {
        Self {
            auth,
            upload_timeout: api.upload_timeout(),
        }
    }

    pub const fn auth(&self) -> &AuthClient<S> {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthClient<S> {
        &mut self.auth
    }

    pub fn into_auth(self) -> AuthClient<S> {
        self.auth
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = self.auth.endpoint(path);
        Ok(self.auth.send(&url, RequestOptions::get()).await?)
    }

    // -----------------------------------------------------------------------
    // Catalog and reader
    // -----------------------------------------------------------------------

    /// `GET /mangas`. Accepts a bare array or an envelope.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] on a non-OK status, plus transport and parse errors.
    pub async fn list_mangas(&self) -> Result<Vec<Manga>, ApiError> {
        let response = check_status(self.get("mangas").await?).await?;
        let payload: ListPayload<Manga> = parse(response).await?;
        let mangas = payload.into_vec();
        tracing::debug!(count = mangas.len(), "loaded mangas");
        Ok(mangas)
    }

    /// `GET /mangas/latest?limit=N`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] when the envelope reports failure.
    pub async fn latest(&self, limit: u32) -> Result<Vec<Manga>, ApiError> {
        let response = self.get(&format!("mangas/latest?limit={limit}")).await?;
        let response = check_status(response).await?;
        let envelope: Envelope<Vec<Manga>> = parse(response).await?;
        envelope.into_result(MANGAS_LOAD_FAILED).map_err(ApiError::Server)
    }

    /// `GET /mangas/:id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] on 404, [`ApiError::Server`] for any other
    /// failure the backend reports.
    pub async fn get_manga(&self, id: i64) -> Result<Manga, ApiError> {
        let response = self.get(&format!("mangas/{id}")).await?;
        match response.status().as_u16() {
            404 => return Err(ApiError::NotFound),
            status if !(200..300).contains(&status) => {
                return Err(ApiError::Server(MANGA_LOAD_FAILED.into()));
            }
            _ => {}
        }
        let envelope: Envelope<Manga> = parse(response).await?;
        envelope.into_result(MANGA_LOAD_FAILED).map_err(ApiError::Server)
    }

    /// `GET /chapters/manga/:id`, in server order.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] on a non-OK status or a failed envelope.
    pub async fn list_chapters(&self, manga_id: i64) -> Result<Vec<Chapter>, ApiError> {
        let response = self.get(&format!("chapters/manga/{manga_id}")).await?;
        if !response.status().is_success() {
            return Err(ApiError::Server(CHAPTERS_LOAD_FAILED.into()));
        }
        let envelope: Envelope<Vec<Chapter>> = parse(response).await?;
        envelope.into_result(CHAPTERS_LOAD_FAILED).map_err(ApiError::Server)
    }

    /// `GET /chapters/manga/:id/:number/pages`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] on a non-OK status or a failed envelope.
    pub async fn chapter_pages(
        &self,
        manga_id: i64,
        number: u32,
    ) -> Result<Vec<PageRef>, ApiError> {
        let response = self
            .get(&format!("chapters/manga/{manga_id}/{number}/pages"))
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Server(PAGES_LOAD_FAILED.into()));
        }
        let envelope: Envelope<PagesPayload> = parse(response).await?;
        envelope
            .into_result(PAGES_LOAD_FAILED)
            .map(|payload| payload.pages)
            .map_err(ApiError::Server)
    }

    // -----------------------------------------------------------------------
    // Authenticated
    // -----------------------------------------------------------------------

    /// `POST /favorites`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] when the backend refuses.
    pub async fn add_favorite(&mut self, manga_id: i64) -> Result<(), ApiError> {
        let url = self.auth.endpoint("favorites");
        let options = RequestOptions::post().json(json!({ "mangaId": manga_id }));
        let response = self.auth.fetch(&url, options).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Server(FAVORITE_FAILED.into()))
        }
    }

    /// `POST /mangas` (create) or `PUT /mangas` (edit), as multipart.
    ///
    /// Uses the bearer token without the session-expiry wrapper: a 401 here
    /// is reported as [`ApiError::Unauthorized`] and the caller decides.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] on 401, [`ApiError::Status`] on any other
    /// non-OK status.
    pub async fn submit_manga(&self, submission: MangaSubmission) -> Result<(), ApiError> {
        let url = self.auth.endpoint("mangas");
        let options = if submission.is_edit() {
            RequestOptions::put()
        } else {
            RequestOptions::post()
        };
        tracing::debug!(
            edit = submission.is_edit(),
            chapters = submission.chapters.len(),
            "submitting manga"
        );
        let options = options
            .multipart(submission.into_form()?)
            .timeout(self.upload_timeout);

        let response = self.auth.send(&url, options).await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        check_status(response).await?;
        Ok(())
    }

    /// `DELETE /mangas/:id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] with the backend message, or the default one.
    pub async fn delete_manga(&mut self, id: i64) -> Result<(), ApiError> {
        let url = self.auth.endpoint(&format!("mangas/{id}"));
        let response = self.auth.fetch(&url, RequestOptions::delete()).await?;
        if response.status().is_success() {
            return Ok(());
        }
        let message = body_message(response)
            .await
            .unwrap_or_else(|| MANGA_DELETE_FAILED.to_string());
        Err(ApiError::Server(message))
    }

    /// `GET /users`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] on a non-OK status.
    pub async fn list_users(&mut self) -> Result<Vec<User>, ApiError> {
        let url = self.auth.endpoint("users");
        let response = self.auth.fetch(&url, RequestOptions::get()).await?;
        let response = check_status(response).await?;
        let body: UsersResponse = parse(response).await?;
        Ok(body.users)
    }

    /// `PUT /users/:id/role`. Returns the server's confirmation message.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] with the backend message, or the default one.
    pub async fn update_role(
        &mut self,
        user_id: i64,
        role: &Role,
    ) -> Result<Option<String>, ApiError> {
        let url = self.auth.endpoint(&format!("users/{user_id}/role"));
        let options = RequestOptions::put().json(json!({ "role": role.as_str() }));
        let response = self.auth.fetch(&url, options).await?;
        confirmation(response, ROLE_UPDATE_FAILED).await
    }

    /// `DELETE /users/:id`. Returns the server's confirmation message.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] with the backend message, or the default one.
    pub async fn delete_user(&mut self, user_id: i64) -> Result<Option<String>, ApiError> {
        let url = self.auth.endpoint(&format!("users/{user_id}"));
        let response = self.auth.fetch(&url, RequestOptions::delete()).await?;
        confirmation(response, USER_DELETE_FAILED).await
    }
}

/// Success → the optional server message; failure → [`ApiError::Server`].
async fn confirmation(
    response: reqwest::Response,
    fallback: &str,
) -> Result<Option<String>, ApiError> {
    let ok = response.status().is_success();
    let message = body_message(response).await;
    if ok {
        Ok(message)
    } else {
        Err(ApiError::Server(message.unwrap_or_else(|| fallback.to_string())))
    }
}
