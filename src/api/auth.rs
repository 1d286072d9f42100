//! Auth endpoints: login, logout, profile.

use anyhow::{Context, Result};
use serde_json::json;

use super::ApiClient;
use super::query::QueryParams;
use super::types::{LoginResponse, Role, User};

impl ApiClient {
    /// Sign in and persist the session.
    ///
    /// Goes straight to the network rather than through the pipeline: no
    /// token exists yet and a stale bearer header must not be attached.
    /// The backend authenticates any active account, so the admin-only
    /// policy is enforced here — a non-admin role fails with access denied
    /// and nothing is stored.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = self.post_anonymous(
            "/auth/login/",
            json!({ "username": username, "password": password }),
        )?;

        let login: LoginResponse =
            serde_json::from_value(body).context("unexpected login response shape")?;

        if login.user.role != Role::Admin {
            anyhow::bail!("access denied: this console is for admin accounts only");
        }

        self.store()
            .set_tokens(&login.tokens.access, &login.tokens.refresh)?;
        self.store().set_user(&login.user)?;

        Ok(login)
    }

    /// Sign out: ask the backend to blacklist the refresh token, then clear
    /// the local session. The server call is best-effort — a failure (or an
    /// absent session) never prevents the local clear.
    pub fn logout(&self) -> Result<()> {
        if let Some(refresh) = self.store().refresh_token() {
            let _ = self.post("/auth/logout/", json!({ "refresh": refresh }));
        }
        self.store().clear()
    }

    /// Fetch the authenticated user's profile.
    pub fn profile(&self) -> Result<User> {
        let body = self.get("/auth/profile/", &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected profile response shape")
    }
}
