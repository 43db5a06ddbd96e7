//! Shared response helpers.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Best human-readable reason for a failed response: the `message` of a JSON
/// body, else the raw body text, else the status reason phrase.
pub async fn failure_message(response: reqwest::Response) -> String {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    let Ok(text) = response.text().await else {
        return reason;
    };
    if is_json {
        return serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_string))
            .filter(|message| !message.is_empty())
            .unwrap_or(reason);
    }
    if text.trim().is_empty() { reason } else { text }
}

/// `message` field of a JSON body, if any.
pub async fn body_message(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("message")?.as_str().map(str::to_string)
}

/// Parse a successful body.
pub async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Non-OK status → [`ApiError::Status`].
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    Err(ApiError::Status {
        status,
        message: failure_message(response).await,
    })
}
