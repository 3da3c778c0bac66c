//! Store error handling
//!
//! Typed errors for store operations. The store signals every failure
//! through `Result` values; nothing in this crate panics on bad input or
//! bad files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create, read, or write the backing file
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Operation requires a loaded store
    #[error("Store is not bound to a backing file. Call open() or load() first.")]
    NotLoaded,

    /// JSON import text did not parse
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON import root was not an object
    #[error("JSON import requires an object at the root, got {found}")]
    NotAnObject { found: &'static str },
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = StoreError::io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            "/some/file.dat",
        );
        let msg = err.to_string();
        assert!(msg.contains("/some/file.dat"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_not_loaded_display() {
        assert!(StoreError::NotLoaded.to_string().contains("not bound"));
    }
}
