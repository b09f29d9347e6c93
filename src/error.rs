/*!
 * Error types for recentmost
 */

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::heap::HeapError;
use crate::system::LookupError;

pub type Result<T> = std::result::Result<T, RecentError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RUNTIME: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum RecentError {
    /// Malformed or missing command line arguments
    Usage(String),

    /// Heap capacity of zero
    InvalidCapacity,

    /// Storage for the retained set could not be reserved
    Allocation { capacity: usize },

    /// I/O error on stdin or stdout
    Io(io::Error),

    /// Configuration error
    Config(String),

    /// Modification time lookup failed for a path
    Lookup { path: PathBuf, source: LookupError },
}

impl RecentError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RecentError::Usage(_)
            | RecentError::InvalidCapacity
            | RecentError::Config(_)
            | RecentError::Allocation { .. } => EXIT_FATAL,
            RecentError::Io(_) | RecentError::Lookup { .. } => EXIT_RUNTIME,
        }
    }

    /// Whether the run must stop.
    ///
    /// Lookup failures only cost the one path they concern.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RecentError::Lookup { .. })
    }

    /// True for a closed stdout, e.g. `recentmost 10 | head -1`
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, RecentError::Io(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecentError::Usage(_) | RecentError::InvalidCapacity => ErrorCategory::Validation,
            RecentError::Allocation { .. } => ErrorCategory::Resource,
            RecentError::Io(_) => ErrorCategory::IoError,
            RecentError::Config(_) => ErrorCategory::Configuration,
            RecentError::Lookup { .. } => ErrorCategory::Metadata,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Argument validation errors
    Validation,
    /// Memory availability errors
    Resource,
    /// I/O operation errors
    IoError,
    /// Configuration errors
    Configuration,
    /// Timestamp lookup errors
    Metadata,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Resource => write!(f, "resource"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Metadata => write!(f, "metadata"),
        }
    }
}

impl fmt::Display for RecentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecentError::Usage(msg) => write!(f, "{}", msg),
            RecentError::InvalidCapacity => {
                write!(f, "need a numeric non-zero value for filecount")
            }
            RecentError::Allocation { capacity } => {
                write!(f, "Unable to allocate room for {} entries", capacity)
            }
            RecentError::Io(err) => write!(f, "I/O error: {}", err),
            RecentError::Config(msg) => write!(f, "Configuration error: {}", msg),
            RecentError::Lookup { path, source } => {
                write!(f, "Cannot stat '{}': {}", path.display(), source.reason())
            }
        }
    }
}

impl std::error::Error for RecentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecentError::Io(err) => Some(err),
            RecentError::Lookup { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for RecentError {
    fn from(err: io::Error) -> Self {
        RecentError::Io(err)
    }
}

impl From<HeapError> for RecentError {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::InvalidCapacity => RecentError::InvalidCapacity,
            HeapError::Allocation { capacity } => RecentError::Allocation { capacity },
        }
    }
}

impl From<serde_json::Error> for RecentError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            RecentError::Io(io::Error::from(err))
        } else {
            RecentError::Config(format!("JSON encode error: {}", err))
        }
    }
}
