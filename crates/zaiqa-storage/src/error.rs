//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (in zaiqa-store) ← What callers of the store see           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
///
/// These errors wrap I/O and serialization failures and provide
/// additional context for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Disk full
    /// - Data directory removed at runtime
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized.
    ///
    /// ## When This Occurs
    /// - Stored document was hand-edited and is no longer valid JSON
    /// - A type change broke compatibility with an old document
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored document claims a schema version this build cannot read.
    ///
    /// ## When This Occurs
    /// - The app was downgraded after the document was migrated forward
    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    /// No usable data directory could be determined.
    ///
    /// ## When This Occurs
    /// - Platform app-data directory cannot be resolved
    /// - The configured directory cannot be created
    #[error("Storage directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version_message() {
        let err = StorageError::UnsupportedSchemaVersion {
            found: 9,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported schema version 9 (supported up to 1)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
