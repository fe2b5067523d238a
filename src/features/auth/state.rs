//! Session state shared by the API client and every screen.
//!
//! A session holds at most one bearer token plus the username it was issued
//! for. Stores are plain blob holders: they never validate, rotate or encrypt
//! the token. Expiry is checked by callers through [`Session::claims`].

use crate::features::auth::token::{self, Claims};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write session file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse session file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage contract for the session.
///
/// Implementations must be safe to share across tasks; writes replace the
/// whole record (last writer wins).
pub trait SessionStore: Send + Sync {
    /// Returns the bearer token, if any.
    fn get(&self) -> Option<String>;
    /// Returns the cached username, if any.
    fn username(&self) -> Option<String>;
    /// Replaces the token and username.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: &str, username: &str) -> Result<(), SessionError>;
    /// Drops the token and username.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk and in-memory record layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoredSession>,
}

impl SessionStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .auth_token
            .clone()
    }

    fn username(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .auth_username
            .clone()
    }

    fn set(&self, token: &str, username: &str) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = StoredSession {
            auth_token: Some(token.to_string()),
            auth_username: Some(username.to_string()),
        };
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = StoredSession::default();
        Ok(())
    }
}

/// Durable store backed by a JSON file, written with `0600` permissions.
/// A missing file is an empty session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoredSession, SessionError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredSession::default())
            }
            Err(source) => {
                return Err(SessionError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| SessionError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn load_or_empty(&self) -> StoredSession {
        self.load().unwrap_or_else(|err| {
            warn!("ignoring unreadable session: {err}");
            StoredSession::default()
        })
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(session)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(write_err)?;
            file.write_all(contents.as_bytes()).map_err(write_err)?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents).map_err(write_err)?;
        }

        debug!("session saved to {}", self.path.display());
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_or_empty().auth_token
    }

    fn username(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_or_empty().auth_username
    }

    fn set(&self, token: &str, username: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.save(&StoredSession {
            auth_token: Some(token.to_string()),
            auth_username: Some(username.to_string()),
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Session context handed to the API client and screens.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.store.get()
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.store.username()
    }

    /// Stores a freshly issued token, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    pub fn set(&self, token: &str, username: &str) -> Result<(), SessionError> {
        self.store.set(token, username)
    }

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Decodes the stored token; `None` when absent or undecodable.
    #[must_use]
    pub fn claims(&self) -> Option<Claims> {
        let token = self.get()?;
        token::decode_claims(&token)
            .inspect_err(|err| debug!("session token not decodable: {err}"))
            .ok()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
