//! Request options and header merging for authenticated calls.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::AuthError;

/// Body of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; the boundary header is set by reqwest.
    Multipart(reqwest::multipart::Form),
}

/// Options for [`crate::AuthClient::fetch`].
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    /// Caller headers. These replace defaults with the same name.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Per-request timeout overriding the client default.
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub const fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub const fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }
}

/// Default headers plus the bearer token, overlaid with caller headers.
///
/// Multipart bodies get no default `Content-Type` so the boundary survives.
///
/// # Errors
///
/// Returns [`AuthError::InvalidHeader`] when a caller header or the token is
/// not a valid header value.
pub fn merge_headers(
    token: Option<&str>,
    multipart: bool,
    caller: &[(String, String)],
) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    if !multipart {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            AuthError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, value);
    }
    for (name, value) in caller {
        let invalid = |reason: String| AuthError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_json_and_bearer() {
        let headers = merge_headers(Some("abc"), false, &[]).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
    }

    #[test]
    fn no_token_means_no_authorization() {
        let headers = merge_headers(None, false, &[]).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn caller_headers_override_defaults() {
        let caller = vec![("content-type".to_string(), "text/plain".to_string())];
        let headers = merge_headers(Some("abc"), false, &caller).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn multipart_leaves_content_type_to_the_body() {
        let headers = merge_headers(Some("abc"), true, &[]).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
    }

    #[test]
    fn bad_header_name_is_reported() {
        let caller = vec![("bad header".to_string(), "x".to_string())];
        let err = merge_headers(None, false, &caller).unwrap_err();
        assert!(matches!(err, AuthError::InvalidHeader { name, .. } if name == "bad header"));
    }
}
