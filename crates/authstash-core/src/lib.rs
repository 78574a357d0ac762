//! Core library for authstash - a demonstration authentication front end.
//!
//! This crate implements the client-side session/authentication core:
//!
//! - `CredentialStore`: the in-memory set of registered users, seeded
//!   with fixed demo accounts
//! - `SessionStore`: session persistence across two storage scopes
//!   (persistent and process-lifetime)
//! - `AuthClient`: the facade UI screens talk to
//!
//! There is no server and no real credential verification; passwords are
//! compared as plaintext by design. The only state that outlives the
//! process is the persistent-scope session.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod utils;

pub use auth::{mint_token, AuthClient, AuthOutcome, CredentialStore, RegisterOutcome, Scope, SessionStore};
pub use config::Config;
pub use error::AuthError;
pub use models::{User, UserSnapshot};
