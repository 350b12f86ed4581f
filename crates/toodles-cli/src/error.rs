//! Command error handling for the interactive session.
//!
//! Every handler returns a [`CommandError`]: an [`ErrorKind`] describing what
//! went wrong plus the underlying `anyhow::Error` carrying the user-facing
//! message. The dispatch loop prints the message after a red `ERR:` marker and
//! keeps going. Startup failures are reported the same way before the process
//! exits.
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `InvalidCommand` | The leading token matches no registered command |
//! | `MissingArguments` | A command needing arguments received none |
//! | `InvalidArgument` | An argument could not be interpreted (e.g. a non-numeric id) |
//! | `IndexOutOfRange` | A history index outside `0..1024` |
//! | `Storage` | The store rejected or failed an operation |
//! | `StorageCritical` | The application directory or store could not be set up |
//! | `Io` | Terminal, temporary file or editor I/O failed |

use std::fmt;

use crate::history::HistoryError;

/// What kind of failure a command ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown command token.
    InvalidCommand,
    /// No argument characters were supplied.
    MissingArguments,
    /// An argument was supplied but is unusable.
    InvalidArgument,
    /// History index outside the ring.
    IndexOutOfRange,
    /// Recoverable storage failure.
    Storage,
    /// Storage or environment failure that leaves the application unusable.
    StorageCritical,
    /// Input/output failure.
    Io,
}

impl ErrorKind {
    /// Get a short description of this error kind.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidCommand => "invalid command",
            Self::MissingArguments => "missing arguments",
            Self::InvalidArgument => "invalid argument",
            Self::IndexOutOfRange => "index out of range",
            Self::Storage => "storage error",
            Self::StorageCritical => "critical storage error",
            Self::Io => "i/o error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A command failure with its kind.
///
/// Displays as the wrapped error's message so it can be shown to the user
/// unchanged.
#[derive(Debug)]
pub struct CommandError {
    /// The kind of this error.
    pub kind: ErrorKind,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CommandError {
    /// Create a new command error with explicit kind.
    pub fn new(kind: ErrorKind, source: impl Into<anyhow::Error>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    fn message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, anyhow::Error::msg(message.into()))
    }

    /// The leading token matched nothing.
    pub fn invalid_command() -> Self {
        Self::message(ErrorKind::InvalidCommand, "Invalid command.")
    }

    /// The named command needs arguments; `synopsis` describes them.
    pub fn missing_arguments(command: &str, synopsis: &str) -> Self {
        Self::message(
            ErrorKind::MissingArguments,
            format!("Missing arguments. Usage: {command} {synopsis}"),
        )
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::message(ErrorKind::InvalidArgument, message)
    }

    /// Create an I/O error.
    pub fn io(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorKind::Io, source)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<toodles_core::Error> for CommandError {
    fn from(err: toodles_core::Error) -> Self {
        let kind = if err.is_critical() {
            ErrorKind::StorageCritical
        } else if matches!(err, toodles_core::Error::Io(_)) {
            ErrorKind::Io
        } else {
            ErrorKind::Storage
        };
        Self::new(kind, err)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err)
    }
}

impl From<HistoryError> for CommandError {
    fn from(err: HistoryError) -> Self {
        let kind = match err {
            HistoryError::IndexOutOfRange(_) => ErrorKind::IndexOutOfRange,
            HistoryError::EmptyLine => ErrorKind::InvalidArgument,
        };
        Self::new(kind, err)
    }
}

/// Result alias used by command handlers.
pub type CommandResult<T> = Result<T, CommandError>;
