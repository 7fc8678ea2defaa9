//! # Store Errors
//!
//! Error types for the order store service layer.
//!
//! ## Error Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Flow                                      │
//! │                                                                         │
//! │  ValidationError ──► CoreError ──┐                                      │
//! │  (bad input)         (domain)    │                                      │
//! │                                  ├──► StoreError ──► caller             │
//! │  StorageError ───────────────────┘    (service                          │
//! │  (persistence)                         surface)                         │
//! │                                                                         │
//! │  + configuration variants owned by this layer                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers match `StoreError::Core(..)` for business rule failures (empty
//! cart, illegal transition, unknown ids) and `StoreError::Storage(..)`
//! for persistence failures. Core messages pass through untouched because
//! they are already user-presentable.

use thiserror::Error;

use zaiqa_core::{CoreError, ValidationError};
use zaiqa_storage::StorageError;

// =============================================================================
// Store Error
// =============================================================================

/// Errors surfaced by order store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Business rule violation from the domain layer.
    ///
    /// The message is already user-presentable ("Cart is empty",
    /// "Order status cannot change from READY to PLACED", ...).
    #[error("{0}")]
    Core(#[from] CoreError),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Reading or writing the persisted state document failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration value failed validation.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

// Raw I/O in this crate only happens while reading the config file; storage
// I/O arrives pre-wrapped as StorageError.
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_message_passes_through_unprefixed() {
        let err = StoreError::from(CoreError::EmptyCart);
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_routes_through_core() {
        let err = StoreError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: quantity must be positive");
    }

    #[test]
    fn test_storage_error_is_prefixed() {
        let err = StoreError::from(StorageError::UnsupportedSchemaVersion {
            found: 9,
            supported: 1,
        });
        assert!(err.to_string().starts_with("Storage error:"));
    }
}
