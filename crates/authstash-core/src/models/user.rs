use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account held by the credential store.
///
/// The username is the unique key. The password is plaintext: this is a
/// demonstration store with fixed demo accounts, not a real credential
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, password: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    /// The subset of this user that gets persisted with a session.
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// The `{username, email}` pair stored next to the session token.
/// Never includes the password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSnapshot {
    pub username: String,
    pub email: String,
}
