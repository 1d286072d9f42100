//! Shared test harness: an in-process HTTP backend built on `tiny_http`.
//!
//! `FakeBackend::start` takes a router closure mapping each request to a
//! status code and JSON body, and records every request it serves so tests
//! can assert on methods, paths, headers, and bodies after the fact.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Response, Server, StatusCode};

use binwatch::config::Config;
use binwatch::session::SessionStore;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, e.g. `/api/auth/profile/`.
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }
}

pub struct FakeBackend {
    server: Arc<Server>,
    addr: std::net::SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeBackend {
    /// Start a backend on an ephemeral port. The router runs on the server
    /// thread for every incoming request.
    pub fn start<F>(router: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, serde_json::Value) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let server_thread = Arc::clone(&server);
        let requests_thread = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for mut request in server_thread.incoming_requests() {
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let recorded = RecordedRequest {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    body,
                };
                requests_thread.lock().unwrap().push(recorded.clone());

                let (code, json) = router(&recorded);
                let response = Response::from_data(json.to_string().into_bytes())
                    .with_status_code(StatusCode(code));
                let _ = request.respond(response);
            }
        });

        Self {
            server,
            addr,
            requests,
            handle: Some(handle),
        }
    }

    /// Config pointing at this backend, with a short timeout so a broken
    /// test fails fast instead of hanging.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.base_url = format!("http://{}/api", self.addr);
        config.api.timeout_ms = 2_000;
        config
    }

    /// Everything served so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A session store in a fresh temp directory. Keep the `TempDir` alive for
/// the duration of the test.
pub fn temp_store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));
    (dir, store)
}
