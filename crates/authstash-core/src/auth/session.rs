use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AuthError;
use crate::models::UserSnapshot;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key for the opaque session token
const TOKEN_KEY: &str = "access_token";

/// Storage key for the serialized user snapshot
const USER_KEY: &str = "user_data";

/// Which storage lifetime a session is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Survives process restarts (file-backed).
    Persistent,
    /// Lives until the process ends (in-memory).
    Session,
}

impl Scope {
    /// Map the "remember me" flag to the scope it selects.
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Scope::Persistent
        } else {
            Scope::Session
        }
    }
}

struct ScopePair {
    persistent: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl ScopePair {
    fn backend(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Persistent => self.persistent.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    fn backend_mut(&mut self, scope: Scope) -> &mut dyn KeyValueStore {
        match scope {
            Scope::Persistent => self.persistent.as_mut(),
            Scope::Session => self.session.as_mut(),
        }
    }
}

/// Session persistence across the two storage scopes.
///
/// A correct caller keeps a session in exactly one scope. Reads check the
/// persistent scope first, so if both ever hold a value the persistent
/// one wins - that precedence is deliberate and tested, not an accident
/// of check order.
///
/// In an environment with no storage backend (`unavailable`), reads
/// behave as if no session exists and clears do nothing; only writes
/// report the condition, and the facade recovers it there.
pub struct SessionStore {
    scopes: Option<ScopePair>,
}

impl SessionStore {
    /// Open a store with a file-backed persistent scope under `dir` and a
    /// fresh in-memory session scope.
    pub fn open(dir: PathBuf) -> Self {
        Self {
            scopes: Some(ScopePair {
                persistent: Box::new(FileStore::new(dir)),
                session: Box::new(MemoryStore::new()),
            }),
        }
    }

    /// Build a store over explicit backends. Used by tests to observe
    /// both scopes directly.
    pub fn with_backends(
        persistent: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            scopes: Some(ScopePair { persistent, session }),
        }
    }

    /// The storage-less variant: every read is empty, every write fails
    /// with `EnvironmentUnavailable`, clears are no-ops.
    pub fn unavailable() -> Self {
        Self { scopes: None }
    }

    /// Open against the configured storage directory, falling back to the
    /// unavailable store when the environment offers none.
    pub fn detect(config: &Config) -> Self {
        match config.session_dir() {
            Ok(dir) => {
                debug!(?dir, "Session storage directory resolved");
                Self::open(dir)
            }
            Err(e) => {
                warn!(error = %e, "No session storage available; sessions will not persist");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.scopes.is_some()
    }

    /// Write the session into exactly one scope.
    ///
    /// The snapshot is written before the token, so an interrupted write
    /// can never leave a token behind without its user. The other scope
    /// is untouched; callers clear both at logout.
    pub fn save(&mut self, token: &str, user: &UserSnapshot, scope: Scope) -> Result<(), AuthError> {
        let Some(scopes) = self.scopes.as_mut() else {
            return Err(AuthError::EnvironmentUnavailable);
        };

        let json = serde_json::to_string(user)?;
        let backend = scopes.backend_mut(scope);
        backend.set(USER_KEY, &json)?;
        backend.set(TOKEN_KEY, token)?;

        debug!(?scope, username = %user.username, "Session saved");
        Ok(())
    }

    /// Read the current session token, persistent scope first.
    pub fn read_token(&self) -> Option<String> {
        let scopes = self.scopes.as_ref()?;
        for scope in [Scope::Persistent, Scope::Session] {
            match scopes.backend(scope).get(TOKEN_KEY) {
                Ok(Some(token)) => return Some(token),
                Ok(None) => {}
                Err(e) => warn!(?scope, error = %e, "Failed to read session token"),
            }
        }
        None
    }

    /// Read the current user snapshot with the same persistent-first
    /// precedence as `read_token`.
    ///
    /// A snapshot that exists but cannot be decoded is reported as
    /// `MalformedSession`, so callers can tell a broken session from a
    /// missing one.
    pub fn read_user(&self) -> Result<Option<UserSnapshot>, AuthError> {
        let Some(scopes) = self.scopes.as_ref() else {
            return Ok(None);
        };

        for scope in [Scope::Persistent, Scope::Session] {
            match scopes.backend(scope).get(USER_KEY) {
                Ok(Some(raw)) => {
                    let snapshot = serde_json::from_str(&raw)?;
                    return Ok(Some(snapshot));
                }
                Ok(None) => {}
                Err(e) => warn!(?scope, error = %e, "Failed to read user snapshot"),
            }
        }
        Ok(None)
    }

    /// Remove the session keys from one scope.
    pub fn clear(&mut self, scope: Scope) -> Result<(), AuthError> {
        let Some(scopes) = self.scopes.as_mut() else {
            return Ok(());
        };
        let backend = scopes.backend_mut(scope);
        backend.remove(TOKEN_KEY)?;
        backend.remove(USER_KEY)?;
        Ok(())
    }

    /// Remove the session keys from both scopes unconditionally.
    /// Idempotent; a scope that fails to clear does not stop the other.
    pub fn clear_all(&mut self) {
        for scope in [Scope::Persistent, Scope::Session] {
            if let Err(e) = self.clear(scope) {
                warn!(?scope, error = %e, "Failed to clear session scope");
            }
        }
    }
}
