//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid identity number: {0}")]
    InvalidIdentityNumber(String),
}

impl CoreError {
    pub fn invalid_identity_number(raw: impl Into<String>) -> Self {
        CoreError::InvalidIdentityNumber(raw.into())
    }
}
