//! Data models for accounts and sessions.
//!
//! - `User`: a registered account held by the credential store
//! - `UserSnapshot`: the subset of a user persisted alongside a session
//!   token

pub mod user;

pub use user::{User, UserSnapshot};
