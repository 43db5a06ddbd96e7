//! Login and registration forms.

use std::sync::LazyLock;

use regex::Regex;

use manga_auth::{AuthClient, AuthOutcome, KeyValueStore, Verification};
use manga_config::UiConfig;
use manga_core::messages::{ALREADY_LOGGED_IN, account_created, welcome};
use manga_core::{Page, Redirect};

use crate::error::ValidationError;
use crate::notify::Notifications;

const MIN_PASSWORD_CHARS: usize = 6;
const MIN_USERNAME_CHARS: usize = 3;

/// Shown on the login and register pages before the form: a visitor whose
/// token still verifies is sent on to their landing page.
pub async fn redirect_if_logged_in<S: KeyValueStore>(
    auth: &mut AuthClient<S>,
    ui: &UiConfig,
    notes: &mut Notifications,
) -> Option<Redirect> {
    match auth.verify_token().await {
        Verification::Verified => {
            notes.info(ALREADY_LOGGED_IN);
            Some(Redirect::delayed(
                Page::after_login(auth.is_admin()),
                ui.login_redirect_ms,
            ))
        }
        // A refused token leaves the visitor logged out, which is what these
        // pages are for; the logout's trip home is not taken.
        Verification::Anonymous | Verification::Rejected(_) => None,
    }
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// [`ValidationError::MissingFields`] when either field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }

    /// Log in. On success, greets the user and returns the landing redirect;
    /// on failure shows the reason and clears the password.
    pub async fn submit<S: KeyValueStore>(
        &mut self,
        auth: &mut AuthClient<S>,
        ui: &UiConfig,
        notes: &mut Notifications,
    ) -> Option<Redirect> {
        if let Err(error) = self.validate() {
            notes.error(error.to_string());
            return None;
        }
        match auth
            .login(self.username.trim(), self.password.trim())
            .await
        {
            AuthOutcome::Success(user) => {
                notes.success(welcome(&user.name));
                Some(Redirect::delayed(
                    Page::after_login(user.is_admin()),
                    ui.login_redirect_ms,
                ))
            }
            AuthOutcome::Failure(message) => {
                notes.error(message);
                self.password.clear();
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// First failing rule, in form order.
    ///
    /// # Errors
    ///
    /// The [`ValidationError`] to show inline.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            &self.name,
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        let password = self.password.trim();
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort);
        }
        if password != self.confirm_password.trim() {
            return Err(ValidationError::PasswordsDiffer);
        }
        if self.username.trim().chars().count() < MIN_USERNAME_CHARS {
            return Err(ValidationError::UsernameTooShort);
        }
        Ok(())
    }

    /// Create the account. Success sends the user to the login page.
    pub async fn submit<S: KeyValueStore>(
        &mut self,
        auth: &mut AuthClient<S>,
        ui: &UiConfig,
        notes: &mut Notifications,
    ) -> Option<Redirect> {
        if let Err(error) = self.validate() {
            notes.error(error.to_string());
            return None;
        }
        let outcome = auth
            .register(
                self.name.trim(),
                self.username.trim(),
                self.email.trim(),
                self.password.trim(),
            )
            .await;
        match outcome {
            AuthOutcome::Success(user) => {
                notes.success(account_created(&user.name));
                Some(Redirect::delayed(Page::Login, ui.register_redirect_ms))
            }
            AuthOutcome::Failure(message) => {
                notes.error(message);
                self.password.clear();
                self.confirm_password.clear();
                None
            }
        }
    }
}
