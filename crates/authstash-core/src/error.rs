use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username or email already exists")]
    DuplicateUser,

    #[error("Stored session data is malformed: {0}")]
    MalformedSession(#[from] serde_json::Error),

    #[error("No storage backend available in this environment")]
    EnvironmentUnavailable,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}
