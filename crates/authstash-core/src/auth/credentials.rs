use tracing::debug;

use crate::error::AuthError;
use crate::models::User;

/// Demo accounts every seeded store starts with.
const DEMO_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("admin", "admin123", "admin@example.com"),
    ("user", "user123", "user@example.com"),
    ("teste", "teste123", "teste@example.com"),
];

/// The authoritative set of registered users.
///
/// Held entirely in memory and mutated only by registration. Records are
/// never updated or deleted. Lookups compare plaintext exactly, with no
/// hashing and no timing mitigation.
///
/// Construct one per process (or per test) and hand it to the
/// `AuthClient`; there is no shared global store.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: Vec<User>,
}

impl CredentialStore {
    /// Create a store seeded with the fixed demo accounts.
    pub fn seeded() -> Self {
        let users = DEMO_ACCOUNTS
            .iter()
            .map(|(username, password, email)| User::new(username, password, email))
            .collect();
        Self { users }
    }

    /// Create an empty store with no demo accounts.
    pub fn empty() -> Self {
        Self { users: Vec::new() }
    }

    /// Register a new user and return the created record.
    ///
    /// Fails with `DuplicateUser` if the username or the email is already
    /// taken (case-sensitive exact match). Password strength is not
    /// checked here; that is a UI-layer hint.
    pub fn register(&mut self, username: &str, password: &str, email: &str) -> Result<User, AuthError> {
        if self
            .users
            .iter()
            .any(|u| u.username == username || u.email == email)
        {
            debug!(username, "Registration rejected: username or email taken");
            return Err(AuthError::DuplicateUser);
        }

        let user = User::new(username, password, email);
        self.users.push(user.clone());
        debug!(username, total = self.users.len(), "User registered");
        Ok(user)
    }

    /// Find a user matching both username and password exactly.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_accounts_present() {
        let store = CredentialStore::seeded();
        assert_eq!(store.len(), 3);

        let admin = store.find_by_username("admin").unwrap();
        assert_eq!(admin.email, "admin@example.com");
    }

    #[test]
    fn test_find_by_credentials_roundtrip_for_all_seeds() {
        let store = CredentialStore::seeded();

        for (username, password, _) in super::DEMO_ACCOUNTS {
            let user = store.find_by_credentials(username, password).unwrap();
            assert_eq!(&user.username, username);

            // Any other password must not match
            assert!(store.find_by_credentials(username, "wrong").is_none());
        }
    }

    #[test]
    fn test_register_and_find() {
        let mut store = CredentialStore::empty();

        let user = store.register("alice", "secret1", "a@x.com").unwrap();
        assert_eq!(user.username, "alice");

        let found = store.find_by_credentials("alice", "secret1").unwrap();
        assert_eq!(found.email, "a@x.com");
    }

    #[test]
    fn test_duplicate_username_rejected_regardless_of_email() {
        let mut store = CredentialStore::empty();
        store.register("alice", "secret1", "a@x.com").unwrap();

        let err = store.register("alice", "other", "b@x.com").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut store = CredentialStore::empty();
        store.register("alice", "secret1", "a@x.com").unwrap();

        let err = store.register("bob", "secret2", "a@x.com").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let store = CredentialStore::seeded();
        assert!(store.find_by_credentials("Admin", "admin123").is_none());
        assert!(store.find_by_credentials("admin", "Admin123").is_none());

        let mut store = CredentialStore::seeded();
        // Different case counts as a different username and email
        store.register("Admin", "pw", "Admin@example.com").unwrap();
    }
}
