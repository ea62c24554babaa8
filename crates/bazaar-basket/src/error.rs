//! # Store Error Types
//!
//! Error types for BasketStore operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (rusqlite::Error)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (storefront shell) surfaces a user-friendly message            │
//! │                                                                         │
//! │  NOTE: read-side failures never reach here. A missing or unparsable    │
//! │  slot payload degrades to an empty basket inside load() — only         │
//! │  write-side and open-time failures are surfaced as StoreError.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// BasketStore operation errors.
///
/// These wrap rusqlite/serde errors and provide additional context.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database could not be opened.
    ///
    /// ## When This Occurs
    /// - Slot file path is not writable
    /// - File permissions issue
    /// - Corrupt database file
    #[error("Failed to open slot database: {0}")]
    OpenFailed(String),

    /// The slot schema could not be prepared.
    #[error("Slot schema setup failed: {0}")]
    SchemaFailed(String),

    /// Writing the basket back to the durable slot failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Database file deleted out from under us
    #[error("Failed to persist basket: {0}")]
    WriteFailed(String),

    /// The in-memory basket could not be serialized.
    ///
    /// Practically unreachable for basket data, but the serializer is
    /// fallible and the failure must not be swallowed.
    #[error("Failed to serialize basket: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::WriteFailed(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = StoreError::OpenFailed("permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to open slot database: permission denied"
        );

        let err = StoreError::WriteFailed("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_rusqlite_maps_to_write_failed() {
        let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StoreError::WriteFailed(_)));
    }
}
