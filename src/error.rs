//! Errors returned by router setup and teardown
//!
//! Logging calls themselves never fail; only `initialize`, `stop` and level parsing
//! report errors to the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`crate::LogRouter`] setup and teardown
#[derive(Debug, Error)]
pub enum RouterError {
    /// The dated log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be created
    #[error("failed to create log file {}: {source}", .path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Flushing or closing the log file failed
    #[error("failed to close log file: {source}")]
    FileClose {
        #[source]
        source: io::Error,
    },

    /// A level specification could not be parsed
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
}

impl RouterError {
    /// The underlying IO error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            RouterError::DirectoryCreation { source, .. }
            | RouterError::FileCreation { source, .. }
            | RouterError::FileClose { source } => Some(source),
            RouterError::InvalidLevel(_) => None,
        }
    }

    /// Classify the underlying IO error for user-facing messages
    pub fn disk_kind(&self) -> Option<DiskErrorKind> {
        self.io_error().map(categorize_io_error)
    }

    /// Message for end users: `context` plus a plain description of the cause
    pub fn friendly_message(&self, context: &str) -> String {
        match self.disk_kind() {
            Some(DiskErrorKind::Other) | None => format!("{}: {}", context, self),
            Some(kind) => format!("{}: {} ({})", context, kind.user_message(), self),
        }
    }
}

/// Categories of disk errors for user-friendly messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied (read or write)
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Other IO error
    Other,
}

impl DiskErrorKind {
    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            DiskErrorKind::DiskFull => "disk full - free space needed to keep logging",
            DiskErrorKind::PermissionDenied => "permission denied writing to the log directory",
            DiskErrorKind::NotFound => "file or directory not found",
            DiskErrorKind::Other => "failed to write log output",
        }
    }
}

/// Categorize an IO error into a user-friendly category
pub fn categorize_io_error(e: &io::Error) -> DiskErrorKind {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::WriteZero => DiskErrorKind::DiskFull,
        ErrorKind::PermissionDenied => DiskErrorKind::PermissionDenied,
        ErrorKind::NotFound => DiskErrorKind::NotFound,
        _ => {
            #[cfg(unix)]
            {
                if let Some(os_error) = e.raw_os_error() {
                    // ENOSPC = 28, EDQUOT = 122 (Linux) / 69 (macOS)
                    if os_error == 28 || os_error == 122 || os_error == 69 {
                        return DiskErrorKind::DiskFull;
                    }
                    // EACCES
                    if os_error == 13 {
                        return DiskErrorKind::PermissionDenied;
                    }
                }
            }
            DiskErrorKind::Other
        }
    }
}
