//! Global error handling for filetools
//!
//! Setup problems (bad source, unusable destination) are reported through
//! this type before any traversal starts. Per-entry problems during a walk
//! never reach it; they are logged and skipped where they happen.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for filetools operations
#[derive(Error, Debug)]
pub enum FileToolsError {
    /// Source is empty, missing or not a directory
    #[error("Please select a valid source folder: {}", .0.display())]
    InvalidSource(PathBuf),

    /// No destination was supplied for an action that needs one
    #[error("Please select a destination folder for copying files")]
    MissingDestination,

    /// Destination did not exist and could not be created
    #[error("Could not create destination folder {}: {source}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination exists but is a file
    #[error("Destination path exists but is not a folder: {}", .0.display())]
    DestinationNotDirectory(PathBuf),

    /// Report file could not be written
    #[error("Could not write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FileToolsError {
    /// Whether the error was raised while validating inputs, before traversal
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource(_)
                | Self::MissingDestination
                | Self::CreateDestination { .. }
                | Self::DestinationNotDirectory(_)
        )
    }
}

/// Specialized Result type for filetools operations
pub type Result<T> = std::result::Result<T, FileToolsError>;

/// Creates a FileToolsError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FileToolsError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            FileToolsError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Allow converting FileToolsError to io::Error so tests can use io::Result
impl From<FileToolsError> for io::Error {
    fn from(err: FileToolsError) -> Self {
        match err {
            FileToolsError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
