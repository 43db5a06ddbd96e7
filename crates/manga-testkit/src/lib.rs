//! # manga-testkit
//!
//! A stub of the SiteManga REST backend for client tests.
//!
//! [`StubBackend`] binds `tiny_http` on `127.0.0.1:0`, serves canned responses
//! per `(method, path)` route, and records every request it receives so tests
//! can assert on headers, bodies, and on requests that were never made.
//!
//! ```no_run
//! use manga_testkit::{StubBackend, StubResponse};
//! use serde_json::json;
//!
//! let backend = StubBackend::start();
//! backend.on("GET", "/mangas", StubResponse::json(200, json!([])));
//! let url = format!("{}/mangas", backend.base_url());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use serde_json::Value;

/// Path prefix the backend mounts its REST API under.
pub const API_PREFIX: &str = "/api";

/// A canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }

    /// An empty body with the given status.
    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }
}

/// A request as received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to [`API_PREFIX`], without the query string.
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON; `Value::Null` when it is not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Text value of a multipart form field, if present.
    ///
    /// Only handles the simple layout `reqwest` produces, which is all the
    /// tests need.
    pub fn multipart_text(&self, name: &str) -> Option<String> {
        let body = self.body_text();
        let marker = format!("{DISPOSITION}{name}\"");
        let start = body.find(&marker)? + marker.len();
        let rest = &body[start..];
        let value_start = rest.find("\r\n\r\n")? + 4;
        let value = &rest[value_start..];
        let end = value.find("\r\n--")?;
        Some(value[..end].to_string())
    }

    /// Names of all multipart parts, in body order.
    pub fn multipart_names(&self) -> Vec<String> {
        let body = self.body_text();
        body.match_indices(DISPOSITION)
            .filter_map(|(index, marker)| {
                let rest = &body[index + marker.len()..];
                rest.find('"').map(|end| rest[..end].to_string())
            })
            .collect()
    }
}

const DISPOSITION: &str = "form-data; name=\"";

struct Route {
    method: String,
    path: String,
    responses: VecDeque<StubResponse>,
}

#[derive(Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<RecordedRequest>,
}

impl State {
    /// Next response for a route. The last queued response repeats forever.
    fn respond(&mut self, method: &str, path: &str) -> Option<StubResponse> {
        let route = self
            .routes
            .iter_mut()
            .find(|route| route.method == method && route.path == path)?;
        if route.responses.len() > 1 {
            route.responses.pop_front()
        } else {
            route.responses.front().cloned()
        }
    }
}

/// Stub REST backend running on a background thread.
///
/// The server stops when the value is dropped.
pub struct StubBackend {
    server: Arc<tiny_http::Server>,
    state: Arc<Mutex<State>>,
    port: u16,
    worker: Option<JoinHandle<()>>,
}

impl StubBackend {
    /// Bind on a random local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics when no local port can be bound.
    pub fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind stub backend"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("stub backend has an IP address");
        let state = Arc::new(Mutex::new(State::default()));

        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            std::thread::spawn(move || serve(&server, &state))
        };

        tracing::debug!(port, "stub backend listening");
        Self {
            server,
            state,
            port,
            worker: Some(worker),
        }
    }

    /// REST base URL, `/api` included.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}{API_PREFIX}", self.port)
    }

    /// Origin serving `/uploads/`.
    pub fn server_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Serve `response` for every `method path` request.
    pub fn on(&self, method: &str, path: &str, response: StubResponse) -> &Self {
        self.on_sequence(method, path, vec![response])
    }

    /// Serve `responses` in order; the last one repeats.
    ///
    /// Registering a route again replaces its queue.
    pub fn on_sequence(&self, method: &str, path: &str, responses: Vec<StubResponse>) -> &Self {
        let mut state = self.lock();
        state
            .routes
            .retain(|route| !(route.method == method && route.path == path));
        state.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            responses: responses.into(),
        });
        drop(state);
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for one route.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn serve(server: &tiny_http::Server, state: &Mutex<State>) {
    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let (full_path, query) = match url.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (url.clone(), None),
        };
        let path = full_path
            .strip_prefix(API_PREFIX)
            .unwrap_or(&full_path)
            .to_string();
        let headers = request
            .headers()
            .iter()
            .map(|header| (header.field.to_string(), header.value.to_string()))
            .collect();
        let mut body = Vec::new();
        if let Err(error) = request.as_reader().read_to_end(&mut body) {
            tracing::warn!(%error, "stub backend failed to read request body");
        }

        let response = {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.requests.push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                query,
                headers,
                body,
            });
            state.respond(&method, &path)
        }
        .unwrap_or_else(|| {
            StubResponse::json(
                404,
                serde_json::json!({"success": false, "message": format!("no stub for {method} {path}")}),
            )
        });

        let content_type =
            tiny_http::Header::from_bytes(&b"Content-Type"[..], response.content_type.as_bytes())
                .expect("static content type is a valid header");
        let reply = tiny_http::Response::from_string(response.body)
            .with_status_code(response.status)
            .with_header(content_type);
        if let Err(error) = request.respond(reply) {
            tracing::warn!(%error, "stub backend failed to respond");
        }
    }
}
