//! Storage error handling
//!
//! Storage failures are fatal for the operation in progress and always
//! surface as a typed error, so callers can tell "storage broken" apart
//! from "no such record" (which is signaled by empty results, never here).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to open the database file
    #[error("Failed to open database at '{path}': {source}")]
    OpenDatabase {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// SQLite error during an operation
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_database_display() {
        let err = StorageError::OpenDatabase {
            path: PathBuf::from("/data/linkeep.db"),
            source: rusqlite::Error::InvalidQuery,
        };

        let msg = err.to_string();
        assert!(msg.contains("Failed to open database"));
        assert!(msg.contains("/data/linkeep.db"));
    }

    #[test]
    fn test_database_error_conversion() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StorageError::Database(_)));
    }
}
