//! The auth client: session lifecycle plus authenticated requests.

use reqwest::StatusCode;
use serde_json::json;

use manga_config::ApiConfig;
use manga_core::messages::{CONNECTION_ERROR, LOGIN_FAILED, REGISTER_FAILED};
use manga_core::responses::AuthResponse;
use manga_core::{Page, Redirect, Session, User};

use crate::error::AuthError;
use crate::fetch::{RequestBody, RequestOptions, merge_headers};
use crate::nav::NavAffordances;
use crate::session_store::SessionStore;
use crate::storage::KeyValueStore;

const USER_AGENT: &str = concat!("sitemanga-cli/", env!("CARGO_PKG_VERSION"));

/// Result of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success(User),
    /// Message to show the user.
    Failure(String),
}

impl AuthOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Result of checking the stored token with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// No token stored; nothing was sent.
    Anonymous,
    Verified,
    /// The token was refused and the session cleared. Carries the navigation
    /// the logout asked for.
    Rejected(Option<Redirect>),
}

impl Verification {
    pub const fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }

    pub const fn redirect(self) -> Option<Redirect> {
        match self {
            Self::Rejected(redirect) => redirect,
            Self::Anonymous | Self::Verified => None,
        }
    }
}

/// Owns the in-memory session and keeps storage and header state in sync
/// with it.
///
/// Every method that changes the session persists it and recomputes
/// [`NavAffordances`] before returning.
pub struct AuthClient<S> {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore<S>,
    session: Session,
    page: Page,
    nav: NavAffordances,
}

impl<S: KeyValueStore> AuthClient<S> {
    /// Build a client and load the persisted session.
    ///
    /// An unreadable store starts the client logged-out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] if the HTTP client cannot be built.
    pub fn new(api: &ApiConfig, store: SessionStore<S>) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(api.request_timeout())
            .build()?;
        Ok(Self::with_http(http, &api.base_url, store))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, store: SessionStore<S>) -> Self {
        let session = store.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to read stored session; starting logged out");
            Session::default()
        });
        let nav = NavAffordances::for_session(&session);
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            session,
            page: Page::Home,
            nav,
        }
    }

    /// Record which page the client is on. Used to decide whether logout
    /// needs to navigate.
    #[must_use]
    pub const fn at_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub const fn nav(&self) -> &NavAffordances {
        &self.nav
    }

    pub const fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub const fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    // -----------------------------------------------------------------------
    // Flows
    // -----------------------------------------------------------------------

    /// `POST /login`. Never retries.
    pub async fn login(&mut self, username: &str, password: &str) -> AuthOutcome {
        let body = json!({ "username": username, "password": password });
        self.authenticate("login", body, LOGIN_FAILED).await
    }

    /// `POST /auth/register`. A successful registration is also a login.
    pub async fn register(
        &mut self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> AuthOutcome {
        let body = json!({
            "name": name,
            "username": username,
            "email": email,
            "password": password,
        });
        self.authenticate("auth/register", body, REGISTER_FAILED)
            .await
    }

    async fn authenticate(
        &mut self,
        path: &str,
        body: serde_json::Value,
        fallback: &str,
    ) -> AuthOutcome {
        let url = self.endpoint(path);
        tracing::debug!(%url, "authenticating");

        let sent = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await;
        let data = match sent {
            Ok(response) => response.json::<AuthResponse>().await,
            Err(error) => Err(error),
        };
        let data = match data {
            Ok(data) => data,
            Err(error) => {
                tracing::warn!(%error, %url, "authentication request failed");
                return AuthOutcome::Failure(CONNECTION_ERROR.to_string());
            }
        };

        let message = data.message.unwrap_or_else(|| fallback.to_string());
        match (data.success, data.token, data.user) {
            (true, Some(token), Some(user)) => {
                self.replace_session(Session::new(token, user.clone()));
                AuthOutcome::Success(user)
            }
            _ => AuthOutcome::Failure(message),
        }
    }

    /// `GET /verify` with the stored token.
    ///
    /// Sends nothing when there is no token. Any failure logs the client out
    /// and hands back the logout redirect.
    pub async fn verify_token(&mut self) -> Verification {
        let Some(token) = self.session.token.clone() else {
            return Verification::Anonymous;
        };
        let url = self.endpoint("verify");

        let verified = match self.http.get(&url).bearer_auth(&token).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<AuthResponse>().await {
                    Ok(AuthResponse {
                        success: true,
                        user: Some(user),
                        ..
                    }) => Some(user),
                    Ok(_) => None,
                    Err(error) => {
                        tracing::warn!(%error, "unreadable verify response");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "token rejected");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "token verification failed");
                None
            }
        };

        if let Some(user) = verified {
            if let Err(error) = self.store.set_user(&user) {
                tracing::warn!(%error, "failed to persist verified user");
            }
            self.session.user = Some(user);
            self.refresh_nav();
            Verification::Verified
        } else {
            Verification::Rejected(self.logout())
        }
    }

    /// Clear the session in memory and in storage.
    ///
    /// Returns a redirect to the home page unless the client is already there.
    pub fn logout(&mut self) -> Option<Redirect> {
        self.session.clear();
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear stored session");
        }
        self.refresh_nav();
        (self.page != Page::Home).then_some(Redirect::immediate(Page::Home))
    }

    fn replace_session(&mut self, session: Session) {
        if let (Some(token), Some(user)) = (&session.token, &session.user)
            && let Err(error) = self.store.set(token, user)
        {
            tracing::warn!(%error, "failed to persist session");
        }
        self.session = session;
        self.refresh_nav();
    }

    fn refresh_nav(&mut self) {
        self.nav = NavAffordances::for_session(&self.session);
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Send a request with merged default headers and the bearer token.
    ///
    /// Every response is returned unmodified, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] on transport failure and
    /// [`AuthError::InvalidHeader`] for unusable headers.
    pub async fn send(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, AuthError> {
        let headers = merge_headers(self.token(), options.is_multipart(), &options.headers)?;
        let RequestOptions {
            method,
            body,
            timeout,
            ..
        } = options;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.body(value.to_string()),
            RequestBody::Multipart(form) => request.multipart(form),
        };
        Ok(request.send().await?)
    }

    /// [`Self::send`], treating 401 and 403 as an expired session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionExpired`] after logging out when the server
    /// answers 401 or 403, plus everything [`Self::send`] can return.
    pub async fn fetch(
        &mut self,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, AuthError> {
        let response = self.send(url, options).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(%status, %url, "session rejected by server");
            let redirect = self.logout();
            return Err(AuthError::SessionExpired { redirect });
        }
        Ok(response)
    }
}
