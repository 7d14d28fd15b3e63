//! Persisted login session
//!
//! Holds the one durable piece of client state: a serialized user record
//! (username, role, token, display name) written as JSON to an XDG-compliant
//! data directory, mirroring the browser-local storage of the original
//! console. Created at login, deleted at logout or on a 401 from a non-auth
//! endpoint.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Role;

/// File name of the session record inside the data directory
const SESSION_FILE: &str = "session.json";

/// The serialized user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// Login name
    pub username: String,
    /// Role granted at login
    pub role: Role,
    /// Opaque bearer token attached to every outgoing request
    pub token: String,
    /// Display name shown in the dashboard header
    pub full_name: String,
    /// When the session was created
    pub logged_in_at: DateTime<Utc>,
}

/// Errors from reading or writing the session record
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem failure while persisting the record
    #[error("session storage: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized
    #[error("session record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Shared session state: an in-memory record with write-through persistence.
///
/// The API client reads the token from here on every request; auth operations
/// store and clear the record. A store created without a directory (tests)
/// keeps the record in memory only.
#[derive(Debug)]
pub struct SessionStore {
    current: Mutex<Option<StoredUser>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Creates a store backed by the XDG data directory, loading any record
    /// persisted by a previous run.
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "hms-console")?;
        Some(Self::with_dir(project_dirs.data_dir().to_path_buf()))
    }

    /// Creates a store backed by a custom directory, loading any existing record
    pub fn with_dir(dir: PathBuf) -> Self {
        let path = dir.join(SESSION_FILE);
        let current = Self::load_record(&path);
        Self {
            current: Mutex::new(current),
            path: Some(path),
        }
    }

    /// Creates a store with no persistence
    pub fn in_memory() -> Self {
        Self {
            current: Mutex::new(None),
            path: None,
        }
    }

    /// Reads a persisted record, tolerating a missing or corrupt file
    fn load_record(path: &PathBuf) -> Option<StoredUser> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// The current user record, if logged in
    pub fn current(&self) -> Option<StoredUser> {
        self.current.lock().expect("session lock poisoned").clone()
    }

    /// The current auth token, if logged in
    pub fn token(&self) -> Option<String> {
        self.current
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|user| user.token.clone())
    }

    /// True if a user record is held
    pub fn is_logged_in(&self) -> bool {
        self.current.lock().expect("session lock poisoned").is_some()
    }

    /// True if the current user holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.current
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|user| user.role == role)
            .unwrap_or(false)
    }

    /// Stores a record, writing it through to disk when a path is configured
    pub fn store(&self, user: StoredUser) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&user)?)?;
        }
        *self.current.lock().expect("session lock poisoned") = Some(user);
        Ok(())
    }

    /// Deletes the record in memory and on disk.
    ///
    /// A failed file removal is ignored; the in-memory clear is what revokes
    /// the token for subsequent requests.
    pub fn clear(&self) {
        *self.current.lock().expect("session lock poisoned") = None;
        if let Some(path) = &self.path {
            let _ = fs::remove_file(path);
        }
    }
}
