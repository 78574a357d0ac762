use std::time::Duration;

use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, info, warn};

use crate::auth::credentials::CredentialStore;
use crate::auth::session::{Scope, SessionStore};
use crate::error::AuthError;
use crate::models::{User, UserSnapshot};

// ============================================================================
// Constants
// ============================================================================

/// Simulated network latency for authenticate/register, in milliseconds.
/// 1 second keeps UI loading states visible without being painful.
const DEFAULT_LATENCY_MS: u64 = 1000;

/// Length of minted session tokens. They are opaque and carry no claims;
/// 32 alphanumerics is plenty for a demo.
const TOKEN_LEN: usize = 32;

/// Result of an authentication attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub user: Option<User>,
}

/// Result of a registration attempt, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub success: bool,
    pub message: String,
}

/// The single entry point UI screens use for authentication.
///
/// Owns the credential store and the session store, both passed in at
/// construction so tests get isolated instances. All operations that
/// simulate network behavior are async and must be awaited to completion;
/// there is no cancellation and no retry. Callers should disable
/// duplicate submissions while a call is in flight.
pub struct AuthClient {
    store: CredentialStore,
    sessions: SessionStore,
    latency: Duration,
}

impl AuthClient {
    pub fn new(store: CredentialStore, sessions: SessionStore) -> Self {
        Self {
            store,
            sessions,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }

    /// Override the simulated latency (zero in tests).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Verify a username/password pair against the credential store.
    ///
    /// Does not establish a session: callers follow up with `login`, or
    /// use `sign_in` to do both in one step.
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        tokio::time::sleep(self.latency).await;

        match self.store.find_by_credentials(username, password) {
            Some(user) => {
                debug!(username, "Authentication succeeded");
                AuthOutcome {
                    success: true,
                    user: Some(user.clone()),
                }
            }
            None => {
                debug!(username, "Authentication failed");
                AuthOutcome {
                    success: false,
                    user: None,
                }
            }
        }
    }

    /// Register a new account. Does not log the user in.
    pub async fn register(&mut self, username: &str, password: &str, email: &str) -> RegisterOutcome {
        tokio::time::sleep(self.latency).await;

        match self.store.register(username, password, email) {
            Ok(user) => {
                info!(username = %user.username, "User registered");
                RegisterOutcome {
                    success: true,
                    message: "Account created successfully".to_string(),
                }
            }
            Err(e) => RegisterOutcome {
                success: false,
                message: user_message(&e),
            },
        }
    }

    /// Persist a session for `user` in the scope selected by `remember_me`.
    ///
    /// Always succeeds from the caller's view; a storage failure is logged
    /// and the caller simply ends up not authenticated.
    pub fn login(&mut self, token: &str, user: &User, remember_me: bool) {
        let scope = Scope::from_remember_me(remember_me);
        if let Err(e) = self.sessions.save(token, &user.snapshot(), scope) {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Verify credentials and persist a session in one step.
    ///
    /// Unlike the separate authenticate/login pair, there is no window in
    /// which a user is verified but no session exists.
    pub async fn sign_in(&mut self, username: &str, password: &str, remember_me: bool) -> AuthOutcome {
        let outcome = self.authenticate(username, password).await;
        if let Some(user) = outcome.user.clone() {
            let token = mint_token();
            self.login(&token, &user, remember_me);
        }
        outcome
    }

    /// Destroy the current session in both scopes. Idempotent.
    pub fn logout(&mut self) {
        self.sessions.clear_all();
        info!("Logged out");
    }

    /// True only when both the token and the user snapshot are present.
    ///
    /// Malformed stored data reads as not authenticated here; callers who
    /// need to tell the difference use `current_user`.
    pub fn is_authenticated(&self) -> bool {
        let has_token = self.sessions.read_token().is_some();
        let has_user = matches!(self.sessions.read_user(), Ok(Some(_)));
        has_token && has_user
    }

    /// The user snapshot for the current session, if any.
    ///
    /// Surfaces `MalformedSession` when stored data exists but cannot be
    /// decoded, so a broken session is distinguishable from a missing one.
    pub fn current_user(&self) -> Result<Option<UserSnapshot>, AuthError> {
        self.sessions.read_user()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.store
    }
}

/// Mint an opaque session token: random alphanumerics, no claims.
pub fn mint_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn user_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => "Invalid username or password".to_string(),
        AuthError::DuplicateUser => "Username or email already exists".to_string(),
        AuthError::MalformedSession(_) => {
            "Stored session is corrupted; please log in again".to_string()
        }
        AuthError::EnvironmentUnavailable | AuthError::Storage(_) => {
            "Session storage is unavailable".to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn memory_sessions() -> SessionStore {
        SessionStore::with_backends(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    fn client() -> AuthClient {
        AuthClient::new(CredentialStore::seeded(), memory_sessions())
            .with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_authenticate_known_user() {
        let client = client();
        let outcome = client.authenticate("admin", "admin123").await;
        assert!(outcome.success);
        assert_eq!(outcome.user.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let client = client();
        let outcome = client.authenticate("admin", "wrong").await;
        assert!(!outcome.success);
        assert!(outcome.user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_does_not_create_session() {
        let client = client();
        let outcome = client.authenticate("admin", "admin123").await;
        assert!(outcome.success);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_does_not_login() {
        let mut client = client();
        let outcome = client.register("alice", "secret1", "a@x.com").await;
        assert!(outcome.success);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_then_authenticated_then_logout() {
        let mut client = client();
        let user = User::new("alice", "secret1", "a@x.com");

        client.login("tok1", &user, false);
        assert!(client.is_authenticated());

        client.logout();
        assert!(!client.is_authenticated());

        // Logout with no session is fine
        client.logout();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_current_user_roundtrip() {
        let mut client = client();
        let user = User::new("alice", "secret1", "a@x.com");

        client.login("tok1", &user, true);
        let current = client.current_user().unwrap().unwrap();
        assert_eq!(current, user.snapshot());
    }

    #[tokio::test]
    async fn test_sign_in_persists_session() {
        let mut client = client();
        let outcome = client.sign_in("admin", "admin123", false).await;
        assert!(outcome.success);
        assert!(client.is_authenticated());
        assert_eq!(client.current_user().unwrap().unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_sign_in_failure_leaves_logged_out() {
        let mut client = client();
        let outcome = client.sign_in("admin", "wrong", true).await;
        assert!(!outcome.success);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_unavailable_environment_reads_logged_out() {
        let mut client = AuthClient::new(CredentialStore::seeded(), SessionStore::unavailable())
            .with_latency(Duration::ZERO);

        let user = User::new("alice", "secret1", "a@x.com");
        client.login("tok1", &user, true);

        assert!(!client.is_authenticated());
        assert_eq!(client.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_session_reads_logged_out_but_distinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let scope_dir = dir.path().join("sessions");
        std::fs::create_dir_all(&scope_dir).unwrap();
        std::fs::write(scope_dir.join("access_token"), "tok1").unwrap();
        std::fs::write(scope_dir.join("user_data"), "{not json").unwrap();

        let client = AuthClient::new(CredentialStore::seeded(), SessionStore::open(scope_dir))
            .with_latency(Duration::ZERO);

        assert!(!client.is_authenticated());
        assert!(matches!(
            client.current_user(),
            Err(AuthError::MalformedSession(_))
        ));
    }

    // The end-to-end scenario: register, re-register, authenticate both
    // ways, then the full login/logout cycle.
    #[tokio::test]
    async fn test_full_demo_flow() {
        let mut client = client();

        let outcome = client.register("alice", "secret1", "a@x.com").await;
        assert!(outcome.success);

        let outcome = client.register("alice", "other", "b@x.com").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Username or email already exists");

        let outcome = client.authenticate("alice", "secret1").await;
        assert!(outcome.success);
        let user = outcome.user.unwrap();
        assert_eq!(user.username, "alice");

        let outcome = client.authenticate("alice", "wrong").await;
        assert!(!outcome.success);

        client.login(&mint_token(), &user, true);
        assert!(client.is_authenticated());

        client.logout();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_mint_token_shape() {
        let a = mint_token();
        let b = mint_token();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
