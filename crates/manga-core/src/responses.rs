//! Response bodies returned by the backend.
//!
//! Most endpoints wrap their payload in `{ success, message, data }`; a few
//! (notably `GET /mangas` on some deployments) return a bare array.

use serde::{Deserialize, Serialize};

use crate::entities::{PageRef, User};

/// `{ success, message, data }` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or return the server message (or `fallback`).
    ///
    /// # Errors
    ///
    /// Returns the failure message when `success` is false or `data` is absent.
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.message.unwrap_or_else(|| fallback.to_string())),
        }
    }
}

/// A list that may arrive bare or wrapped in an [`Envelope`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(Envelope<Vec<T>>),
}

impl<T> ListPayload<T> {
    /// Items of the list. A wrapped failure yields an empty list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Wrapped(envelope) if envelope.success => envelope.data.unwrap_or_default(),
            Self::Wrapped(_) => Vec::new(),
        }
    }
}

/// Body of `/login`, `/auth/register`, and `/verify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Any body that may carry a `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` of `GET /chapters/manga/:id/:number/pages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagesPayload {
    #[serde(default)]
    pub pages: Vec<PageRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Manga;

    #[test]
    fn list_payload_accepts_bare_array() {
        let payload: ListPayload<Manga> =
            serde_json::from_str(r#"[{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]"#).unwrap();
        assert_eq!(payload.into_vec().len(), 2);
    }

    #[test]
    fn list_payload_accepts_envelope() {
        let payload: ListPayload<Manga> =
            serde_json::from_str(r#"{"success": true, "data": [{"id": 1, "title": "A"}]}"#)
                .unwrap();
        assert_eq!(payload.into_vec().len(), 1);
    }

    #[test]
    fn failed_envelope_is_empty_list() {
        let payload: ListPayload<Manga> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert!(payload.into_vec().is_empty());
    }

    #[test]
    fn envelope_failure_prefers_server_message() {
        let envelope: Envelope<Manga> =
            serde_json::from_str(r#"{"success": false, "message": "Mangá removido"}"#).unwrap();
        assert_eq!(envelope.into_result("fallback").unwrap_err(), "Mangá removido");

        let envelope: Envelope<Manga> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(envelope.into_result("fallback").unwrap_err(), "fallback");
    }
}
