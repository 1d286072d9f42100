//! Persistent session storage for the signed-in admin.
//!
//! Three values survive across invocations: the access token, the refresh
//! token, and the cached user profile. They live together in
//! `~/.binwatch/session.json`; `clear` deletes the file so a logout always
//! removes all three at once. The store tracks no expiry of its own —
//! token expiry is discovered reactively when the backend answers 401.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::types::User;

/// The persisted session: token pair plus the cached user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Synchronous file-backed store. Reads are tolerant: a missing or
/// malformed file reads as "no session".
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location (`~/.binwatch/session.json`).
    pub fn open() -> Self {
        Self {
            path: default_session_path(),
        }
    }

    /// Store at an explicit path. Used by tests to isolate state.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the current session, if any.
    pub fn get(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn access_token(&self) -> Option<String> {
        self.get().map(|s| s.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get().map(|s| s.refresh_token)
    }

    pub fn user(&self) -> Option<User> {
        self.get().and_then(|s| s.user)
    }

    /// Replace the token pair, keeping any cached user profile.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<()> {
        let user = self.get().and_then(|s| s.user);
        self.write(&Session {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            user,
        })
    }

    /// Cache the user profile alongside the stored tokens.
    pub fn set_user(&self, user: &User) -> Result<()> {
        let mut session = self
            .get()
            .context("no active session to attach the user profile to")?;
        session.user = Some(user.clone());
        self.write(&session)
    }

    /// Remove the session file (access token, refresh token, and user).
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("failed to remove session file"),
        }
    }

    fn write(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("failed to create session directory")?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json).context("failed to write session file")?;

        // The file holds credentials; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        Ok(())
    }
}

fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".binwatch")
        .join("session.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Role;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        (dir, store)
    }

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "admin",
            "first_name": "Priya",
            "role": "admin"
        }))
        .unwrap()
    }

    #[test]
    fn empty_store_reads_as_no_session() {
        let (_dir, store) = temp_store();
        assert!(store.get().is_none());
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn tokens_and_user_roundtrip() {
        let (_dir, store) = temp_store();
        store.set_tokens("access-1", "refresh-1").unwrap();
        store.set_user(&sample_user()).unwrap();

        let session = store.get().unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.refresh_token, "refresh-1");
        assert_eq!(session.user.unwrap().role, Role::Admin);
    }

    #[test]
    fn set_tokens_preserves_cached_user() {
        let (_dir, store) = temp_store();
        store.set_tokens("access-1", "refresh-1").unwrap();
        store.set_user(&sample_user()).unwrap();

        store.set_tokens("access-2", "refresh-1").unwrap();
        assert_eq!(store.access_token().unwrap(), "access-2");
        assert_eq!(store.user().unwrap().username, "admin");
    }

    #[test]
    fn set_user_without_session_fails() {
        let (_dir, store) = temp_store();
        assert!(store.set_user(&sample_user()).is_err());
    }

    #[test]
    fn clear_removes_everything_and_is_idempotent() {
        let (_dir, store) = temp_store();
        store.set_tokens("a", "r").unwrap();
        store.clear().unwrap();
        assert!(store.get().is_none());
        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_reads_as_no_session() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(store.get().is_none());
    }
}
