//! HTTP client for the waste-reporting backend.
//!
//! [`ApiClient`] owns the request pipeline every domain call goes through:
//! compose the URL, attach `Content-Type` and (when signed in) the bearer
//! token, issue the call, and normalize failures into readable messages.
//! A 401 triggers exactly one refresh-and-retry cycle; if the refresh
//! fails the stored session is cleared and [`SessionExpired`] is raised so
//! the caller can send the user back to `binwatch login`. There is no
//! retry loop — a 401 on the retried request is a plain error.
//!
//! Domain endpoint wrappers live in the sibling modules as further
//! `impl ApiClient` blocks.

pub mod auth;
pub mod collectors;
pub mod dashboard;
pub mod query;
pub mod reports;
pub mod types;

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::Config;
use crate::session::SessionStore;
use query::QueryParams;

/// Raised when a request hit a 401 and the refresh procedure could not
/// produce a new access token. By the time a caller sees this the local
/// session has already been cleared.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

impl fmt::Display for SessionExpired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session expired — sign in again with `binwatch login`")
    }
}

impl std::error::Error for SessionExpired {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Outcome of one dispatched request, before the 401 policy is applied.
enum Dispatch {
    Body(Value),
    Unauthorized,
}

pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, store: SessionStore) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.api.timeout_ms))
            .build();
        Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            agent,
            store,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Request pipeline
    // -----------------------------------------------------------------------

    /// Issue an authenticated request and return the parsed JSON body.
    ///
    /// Applies the single refresh-and-retry cycle on 401. `body` is sent as
    /// JSON for POST requests; GET requests carry only query parameters.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value> {
        match self.dispatch(method, path, params, body)? {
            Dispatch::Body(value) => Ok(value),
            Dispatch::Unauthorized => {
                if self.refresh() {
                    // Headers are rebuilt from the store, which now holds
                    // the fresh access token. One retry only.
                    match self.dispatch(method, path, params, body)? {
                        Dispatch::Body(value) => Ok(value),
                        Dispatch::Unauthorized => {
                            anyhow::bail!("request unauthorized even after token refresh")
                        }
                    }
                } else {
                    self.store.clear()?;
                    Err(SessionExpired.into())
                }
            }
        }
    }

    pub fn get(&self, path: &str, params: &QueryParams) -> Result<Value> {
        self.send(Method::Get, path, params, None)
    }

    pub fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.send(Method::Post, path, &QueryParams::new(), Some(&body))
    }

    /// One network round trip with the current stored credentials.
    fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Dispatch> {
        let url = self.url(path);
        let mut request = self
            .agent
            .request(method.as_str(), &url)
            .set("Content-Type", "application/json");

        if let Some(token) = self.store.access_token() {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        for (key, value) in params.pairs() {
            request = request.query(key, value);
        }

        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };

        match result {
            Ok(response) => Ok(Dispatch::Body(parse_body(response))),
            Err(ureq::Error::Status(401, _)) => Ok(Dispatch::Unauthorized),
            Err(ureq::Error::Status(code, response)) => {
                anyhow::bail!(error_message(code, response))
            }
            Err(ureq::Error::Transport(transport)) => Err(anyhow::Error::new(transport))
                .with_context(|| format!("request to {url} failed")),
        }
    }

    // -----------------------------------------------------------------------
    // Refresh procedure
    // -----------------------------------------------------------------------

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns `false` without a network call when no refresh token is
    /// stored, and `false` on any network or non-success response. Never
    /// clears the store itself; the pipeline decides that.
    pub fn refresh(&self) -> bool {
        let Some(refresh) = self.store.refresh_token() else {
            return false;
        };

        let url = self.url("/auth/token/refresh/");
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(serde_json::json!({ "refresh": refresh }));

        let Ok(response) = result else {
            return false;
        };
        let Ok(data) = response.into_json::<Value>() else {
            return false;
        };
        let Some(access) = data.get("access").and_then(Value::as_str) else {
            return false;
        };

        // The backend does not rotate refresh tokens; keep the stored one
        // unless the response carries a replacement.
        let refresh = data
            .get("refresh")
            .and_then(Value::as_str)
            .unwrap_or(&refresh)
            .to_string();

        self.store.set_tokens(access, &refresh).is_ok()
    }

    /// Whether the backend is reachable at all. Any HTTP response counts,
    /// including error statuses; only a transport failure means "down".
    pub fn ping(&self) -> bool {
        match self.agent.get(&self.base_url).call() {
            Ok(_) | Err(ureq::Error::Status(_, _)) => true,
            Err(ureq::Error::Transport(_)) => false,
        }
    }

    /// POST without the bearer header. Used by login, which runs before any
    /// token exists and must not pick up a stale one.
    pub(crate) fn post_anonymous(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&body);

        match result {
            Ok(response) => Ok(parse_body(response)),
            Err(ureq::Error::Status(code, response)) => {
                anyhow::bail!(error_message(code, response))
            }
            Err(ureq::Error::Transport(transport)) => Err(anyhow::Error::new(transport))
                .with_context(|| format!("request to {url} failed")),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Parse a success body as JSON, treating an empty or unparseable body as
/// an empty object.
fn parse_body(response: ureq::Response) -> Value {
    response
        .into_string()
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
}

/// Human-readable message for a non-success response: the body's `error`
/// or `detail` field when present, else a generic status line.
fn error_message(code: u16, response: ureq::Response) -> String {
    let body: Value = response
        .into_string()
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or(Value::Null);

    body.get("error")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {code}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }

    #[test]
    fn session_expired_points_at_login() {
        let message = SessionExpired.to_string();
        assert!(message.contains("binwatch login"));
    }

    #[test]
    fn client_strips_trailing_slash_from_base_url() {
        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:8000/api/".to_string();
        let store = SessionStore::at(std::env::temp_dir().join("binwatch-url-test.json"));
        let client = ApiClient::new(&config, store);
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(client.url("/auth/profile/"), "http://127.0.0.1:8000/api/auth/profile/");
    }
}
