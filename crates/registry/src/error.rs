//! Registry errors

use freezeguard_core::{Address, UserId};
use thiserror::Error;

/// Errors from the Compliance Registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("User {user_id} not found for trusted intermediary {trusted_intermediary}")]
    UserNotFound {
        trusted_intermediary: Address,
        user_id: UserId,
    },

    #[error("Address {0} is already attached to a user")]
    AddressAlreadyAttached(Address),

    #[error("Address {0} is not attached to any user")]
    AddressNotAttached(Address),

    #[error("Invalid registry snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Attribute keys and values length mismatch ({keys} keys, {values} values)")]
    AttributeLengthMismatch { keys: usize, values: usize },
}

impl RegistryError {
    /// Stable error code reported to callers
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::UserNotFound { .. } => "UR01",
            RegistryError::AddressAlreadyAttached(_) => "UR02",
            RegistryError::AddressNotAttached(_) => "UR03",
            RegistryError::InvalidSnapshot(_) => "UR04",
            RegistryError::AttributeLengthMismatch { .. } => "UR05",
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
