//! Structured error types for shopctl-core.
//!
//! Uses `thiserror` so the store backends and the binary can match on
//! variants. The binary (shopctl-cli) wraps these in `anyhow` at the edge.

use std::io;
use thiserror::Error;

/// Error raised by a [`crate::ShopStore`] implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the statement
    #[error("database error: {source}")]
    Database {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A row with the same key already exists
    #[error("conflict: {entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },

    /// Row count no longer fits the integer key column
    #[error("cannot assign {entity} id: row count {count} exceeds the key range")]
    IdOverflow { entity: &'static str, count: i64 },
}

impl StoreError {
    /// Wrap any backend error
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Database {
            source: source.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(entity: &'static str, key: impl ToString) -> Self {
        Self::Conflict {
            entity,
            key: key.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error ending a menu action
#[derive(Error, Debug)]
pub enum ShopError {
    /// Data store failure; ends the session
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing to the console failed
    #[error("console error: {source}")]
    Console {
        #[from]
        source: io::Error,
    },

    /// The user cancelled, or input ended, part way through an action
    #[error("action abandoned")]
    Abandoned,
}

impl ShopError {
    /// Whether the session can carry on at the menu after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Abandoned)
    }
}

/// Result type alias for menu actions
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::conflict("customer", 7);
        assert_eq!(err.to_string(), "conflict: customer '7' already exists");

        let err = StoreError::IdOverflow {
            entity: "mechanic",
            count: i64::MAX,
        };
        assert!(err.to_string().contains("mechanic"));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: ShopError = StoreError::conflict("car", "1HGCM").into();
        assert_eq!(err.to_string(), "conflict: car '1HGCM' already exists");
        assert!(!err.is_recoverable());
        assert!(ShopError::Abandoned.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed");
        let err: ShopError = io_err.into();

        assert!(matches!(err, ShopError::Console { .. }));
    }
}
