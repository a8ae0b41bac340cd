//! API key gate for mutating routes.

use thiserror::Error;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("API key is missing")]
    Missing,
    #[error("Invalid API key")]
    Invalid,
}

/// Exact, case-sensitive comparison against the configured secret.
pub fn authenticate(provided: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match provided {
        None => Err(AuthError::Missing),
        Some(key) if key == expected => Ok(()),
        Some(_) => Err(AuthError::Invalid),
    }
}
