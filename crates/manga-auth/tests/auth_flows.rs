//! Auth client flows against the stub backend.

use manga_auth::{
    AuthClient, AuthError, AuthOutcome, KeyValueStore, MemoryStore, RequestOptions, SessionStore,
    Verification,
};
use manga_core::messages::CONNECTION_ERROR;
use manga_core::{Page, Redirect, Role};
use manga_testkit::{StubBackend, StubResponse};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user_json(role: &str) -> serde_json::Value {
    json!({"id": 5, "name": "Marina", "username": "marina", "email": "marina@example.com", "role": role})
}

fn client(backend: &StubBackend, store: &MemoryStore) -> AuthClient<MemoryStore> {
    AuthClient::with_http(
        reqwest::Client::new(),
        &backend.base_url(),
        SessionStore::new(store.clone()),
    )
}

fn logged_in_store(token: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set("token", token).unwrap();
    store.set("user", &user_json("admin").to_string()).unwrap();
    store
}

/// Logged-in iff both halves are present, in memory and in storage.
fn assert_consistent(client: &AuthClient<MemoryStore>, store: &MemoryStore) {
    let session = client.session();
    assert_eq!(
        client.is_logged_in(),
        session.token.is_some() && session.user.is_some()
    );
    assert_eq!(store.get("token").unwrap(), session.token);
}

#[tokio::test]
async fn login_success_persists_session() {
    let backend = StubBackend::start();
    backend.on(
        "POST",
        "/login",
        StubResponse::json(200, json!({"success": true, "token": "jwt-1", "user": user_json("admin")})),
    );
    let store = MemoryStore::new();
    let mut client = client(&backend, &store);

    let outcome = client.login("marina", "segredo").await;

    let AuthOutcome::Success(user) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(user.role, Role::Admin);
    assert!(client.is_logged_in());
    assert!(client.is_admin());
    assert_eq!(client.token(), Some("jwt-1"));
    assert!(client.nav().show_admin_link);
    assert_eq!(client.nav().auth_label, "Logout");
    assert_consistent(&client, &store);

    let request = &backend.requests_to("POST", "/login")[0];
    assert_eq!(request.json(), json!({"username": "marina", "password": "segredo"}));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn login_failure_returns_server_message() {
    let backend = StubBackend::start();
    backend.on(
        "POST",
        "/login",
        StubResponse::json(401, json!({"success": false, "message": "Credenciais inválidas"})),
    );
    let store = MemoryStore::new();
    let mut client = client(&backend, &store);

    let outcome = client.login("marina", "errada").await;

    assert_eq!(outcome, AuthOutcome::Failure("Credenciais inválidas".into()));
    assert!(!client.is_logged_in());
    assert_consistent(&client, &store);
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let base_url = {
        let backend = StubBackend::start();
        backend.base_url()
    };
    let store = MemoryStore::new();
    let mut client = AuthClient::with_http(
        reqwest::Client::new(),
        &base_url,
        SessionStore::new(store.clone()),
    );

    let outcome = client.login("marina", "segredo").await;

    assert_eq!(outcome, AuthOutcome::Failure(CONNECTION_ERROR.into()));
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn register_logs_the_new_user_in() {
    let backend = StubBackend::start();
    backend.on(
        "POST",
        "/auth/register",
        StubResponse::json(201, json!({"success": true, "token": "jwt-2", "user": user_json("user")})),
    );
    let store = MemoryStore::new();
    let mut client = client(&backend, &store);

    let outcome = client
        .register("Marina", "marina", "marina@example.com", "segredo")
        .await;

    assert!(outcome.is_success());
    assert!(client.is_logged_in());
    assert!(!client.is_admin());
    assert_consistent(&client, &store);
    let body = backend.requests_to("POST", "/auth/register")[0].json();
    assert_eq!(body["email"], "marina@example.com");
    assert_eq!(body["name"], "Marina");
}

#[tokio::test]
async fn verify_without_token_sends_nothing() {
    let backend = StubBackend::start();
    let store = MemoryStore::new();
    let mut client = client(&backend, &store);

    assert_eq!(client.verify_token().await, Verification::Anonymous);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn verify_with_invalid_token_logs_out() {
    let backend = StubBackend::start();
    backend.on(
        "GET",
        "/verify",
        StubResponse::json(401, json!({"success": false, "message": "Token inválido"})),
    );
    let store = logged_in_store("stale");
    let mut client = client(&backend, &store).at_page(Page::Admin);
    assert!(client.is_logged_in());

    assert_eq!(
        client.verify_token().await,
        Verification::Rejected(Some(Redirect::immediate(Page::Home)))
    );

    assert!(!client.is_logged_in());
    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(store.get("user").unwrap(), None);
    assert_eq!(client.nav().auth_label, "Login");
    assert_consistent(&client, &store);
    assert_eq!(
        backend.requests_to("GET", "/verify")[0].header("authorization"),
        Some("Bearer stale")
    );
}

#[tokio::test]
async fn verify_success_replaces_stored_user() {
    let backend = StubBackend::start();
    let mut renamed = user_json("user");
    renamed["name"] = json!("Marina S.");
    backend.on(
        "GET",
        "/verify",
        StubResponse::json(200, json!({"success": true, "user": renamed})),
    );
    let store = logged_in_store("jwt-1");
    let mut client = client(&backend, &store);

    assert_eq!(client.verify_token().await, Verification::Verified);

    assert_eq!(client.user().map(|u| u.name.as_str()), Some("Marina S."));
    assert!(!client.is_admin());
    let stored: serde_json::Value = serde_json::from_str(&store.get("user").unwrap().unwrap()).unwrap();
    assert_eq!(stored["name"], "Marina S.");
    assert_consistent(&client, &store);
}

#[tokio::test]
async fn verify_success_false_logs_out() {
    let backend = StubBackend::start();
    backend.on("GET", "/verify", StubResponse::json(200, json!({"success": false})));
    let store = logged_in_store("jwt-1");
    let mut client = client(&backend, &store);

    let verification = client.verify_token().await;
    assert!(!verification.is_verified());
    assert_eq!(verification.redirect(), None);
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn rejected_token_on_the_reader_navigates_home() {
    let backend = StubBackend::start();
    backend.on("GET", "/verify", StubResponse::json(403, json!({"success": false})));
    let store = logged_in_store("expired");
    let mut client = client(&backend, &store).at_page(Page::Reader {
        manga_id: 7,
        chapter: Some(2),
    });

    let verification = client.verify_token().await;

    assert_eq!(
        verification,
        Verification::Rejected(Some(Redirect::immediate(Page::Home)))
    );
    assert_eq!(verification.redirect().map(|r| r.to.path()).as_deref(), Some("index.html"));
    assert_consistent(&client, &store);
}

#[tokio::test]
async fn fetch_sends_bearer_and_passes_errors_through() {
    let backend = StubBackend::start();
    backend.on("GET", "/users", StubResponse::json(500, json!({"message": "boom"})));
    let store = logged_in_store("jwt-1");
    let mut client = client(&backend, &store);

    let url = client.endpoint("/users");
    let response = client.fetch(&url, RequestOptions::get()).await.unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert!(client.is_logged_in());
    let request = &backend.requests_to("GET", "/users")[0];
    assert_eq!(request.header("authorization"), Some("Bearer jwt-1"));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn fetch_forbidden_expires_session() {
    let backend = StubBackend::start();
    backend.on("DELETE", "/users/9", StubResponse::empty(403));
    let store = logged_in_store("jwt-1");
    let mut client = client(&backend, &store).at_page(Page::Admin);

    let url = client.endpoint("users/9");
    let err = client
        .fetch(&url, RequestOptions::delete())
        .await
        .unwrap_err();

    let AuthError::SessionExpired { redirect } = err else {
        panic!("expected SessionExpired, got {err:?}");
    };
    assert_eq!(redirect, Some(Redirect::immediate(Page::Home)));
    assert_eq!(
        AuthError::SessionExpired { redirect: None }.to_string(),
        "Sessão expirada. Faça login novamente."
    );
    assert!(!client.is_logged_in());
    assert_consistent(&client, &store);
}

#[tokio::test]
async fn logout_on_home_does_not_navigate() {
    let backend = StubBackend::start();
    let store = logged_in_store("jwt-1");
    let mut client = client(&backend, &store);

    assert_eq!(client.logout(), None);
    assert!(!client.is_logged_in());
    assert_consistent(&client, &store);
}

#[test]
fn endpoints_join_without_double_slash() {
    let client = AuthClient::with_http(
        reqwest::Client::new(),
        "http://api.local/api/",
        SessionStore::new(MemoryStore::new()),
    );
    assert_eq!(client.endpoint("/mangas/3"), "http://api.local/api/mangas/3");
    assert_eq!(client.endpoint("verify"), "http://api.local/api/verify");
}
