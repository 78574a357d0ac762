//! Small shared helpers.

pub mod password;

pub use password::{password_strength, PasswordStrength};
