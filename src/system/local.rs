//! Local filesystem implementation of TimestampProvider

use super::{LookupError, TimestampProvider};
use crate::core::entry::ModTime;
use filetime::FileTime;
use std::path::Path;

/// Reads modification times from the local filesystem.
///
/// Symlinks are followed, so a link reports the time of its target.
///
/// # Example
///
/// ```rust,no_run
/// use recentmost::system::{LocalTimestamps, TimestampProvider};
/// use std::path::Path;
///
/// let provider = LocalTimestamps::new();
/// let modified = provider.modified(Path::new("Cargo.toml")).unwrap();
/// println!("{}", modified.unix_seconds());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalTimestamps;

impl LocalTimestamps {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalTimestamps {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampProvider for LocalTimestamps {
    fn modified(&self, path: &Path) -> Result<ModTime, LookupError> {
        if path.as_os_str().is_empty() {
            return Err(LookupError::NotFound(path.to_path_buf()));
        }

        let meta = std::fs::metadata(path).map_err(|e| LookupError::from_io(path, e))?;
        Ok(FileTime::from_last_modification_time(&meta).into())
    }
}
