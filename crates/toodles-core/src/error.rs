//! Error types and handling for toodles-core operations.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Errors carry a
//! human-readable message that the CLI prints verbatim after an `ERR:` marker,
//! so messages are written for end users rather than for developers.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading attachment files, writing them back to disk
//! - **Database Errors**: anything SQLite reports
//! - **Storage Errors**: validation failures in storage operations
//! - **Not Found**: unknown todo or attachment ids
//! - **Environment / Config Errors**: application directory and `config.toml`
//!
//! ## Criticality
//!
//! Environment and configuration failures happen while the application is
//! starting up and leave it without a usable store. [`Error::is_critical`]
//! reports them so the binary can exit instead of entering the prompt loop:
//!
//! ```rust
//! use toodles_core::Error;
//!
//! let err = Error::Environment("HOME environment variable not set.".into());
//! assert!(err.is_critical());
//!
//! let err = Error::NotFound("Todo with id 7".into());
//! assert!(!err.is_critical());
//! ```

use thiserror::Error;

/// The main error type for toodles-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading files to attach and writing attachments to disk.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// SQLite reported an error. The message is passed through unchanged.
    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    /// A storage operation was rejected before touching the database.
    #[error("{0}")]
    Storage(String),

    /// Requested todo or attachment does not exist.
    #[error("{0} not found.")]
    NotFound(String),

    /// Caller supplied an unusable value (empty title, missing path, ...).
    #[error("{0}")]
    InvalidInput(String),

    /// The application environment could not be prepared.
    #[error("{0}")]
    Environment(String),

    /// Configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error makes the application unusable.
    ///
    /// Only startup failures are critical; everything a single command can
    /// trigger is reported and the session continues.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Environment(_) | Self::Config(_))
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Database(_) => "database",
            Self::Storage(_) => "storage",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Environment(_) => "environment",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
