//! Timestamp lookup behind a narrow trait
//!
//! This module provides the `TimestampProvider` abstraction and its
//! implementations:
//! - `LocalTimestamps`: asks the local filesystem
//! - `MockTimestamps`: in-memory map for testing (in tests module)

mod local;

pub use local::LocalTimestamps;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockTimestamps;

use crate::core::entry::ModTime;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// Classify an I/O error raised while inspecting `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => LookupError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                LookupError::PermissionDenied(path.to_path_buf())
            }
            _ => LookupError::Io(err),
        }
    }

    /// What went wrong, without the path
    pub fn reason(&self) -> String {
        match self {
            LookupError::NotFound(_) => "not found".to_string(),
            LookupError::PermissionDenied(_) => "permission denied".to_string(),
            LookupError::Io(err) => err.to_string(),
        }
    }
}

/// Source of modification times.
///
/// Implementations hide every platform difference; callers only see an
/// ordered [`ModTime`] or a failure that they are expected to skip.
pub trait TimestampProvider {
    fn modified(&self, path: &Path) -> Result<ModTime, LookupError>;
}

impl<T: TimestampProvider + ?Sized> TimestampProvider for &T {
    fn modified(&self, path: &Path) -> Result<ModTime, LookupError> {
        (**self).modified(path)
    }
}
