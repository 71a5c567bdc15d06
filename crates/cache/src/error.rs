//! Error types for the cache crate

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for cache operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Caller misuse: malformed key, empty path set, too many keys
    #[error("invalid cache input: {message}")]
    #[diagnostic(
        code(stash::cache::validation),
        help("keys are limited to 512 characters without commas, at most 10 per lookup")
    )]
    Validation {
        /// What constraint the input violated
        message: String,
    },

    /// Packaged archive exceeds the configured size ceiling
    #[error("archive is {size} bytes, above the {limit} byte cache limit")]
    #[diagnostic(
        code(stash::cache::capacity),
        help("split the cached paths across smaller entries")
    )]
    Capacity {
        /// Measured archive size in bytes
        size: u64,
        /// Configured ceiling in bytes
        limit: u64,
    },

    /// A save resolved zero existing paths
    #[error("no files matched the requested cache paths")]
    #[diagnostic(
        code(stash::cache::nothing_to_cache),
        help("check that the paths exist relative to the workspace root")
    )]
    NothingToCache,

    /// I/O error during cache operations
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(stash::cache::io),
        help("check file permissions and ensure the path exists")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed (e.g., "read", "write", "create")
        operation: String,
    },

    /// Archive packaging or extraction failure
    #[error("archive error: {message}")]
    #[diagnostic(code(stash::cache::archive))]
    Archive {
        /// Error message describing the codec failure
        message: String,
    },
}

impl Error {
    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// Create an I/O error without path context
    #[must_use]
    pub fn io_no_path(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: None,
            operation: operation.into(),
        }
    }

    /// Create an archive error
    #[must_use]
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
        }
    }

    /// Returns true if this error is an environmental failure the cache can
    /// absorb (logged and turned into a degraded outcome) rather than a
    /// caller error that must surface.
    #[must_use]
    pub fn is_degradable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Archive { .. })
    }
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, Error>;
