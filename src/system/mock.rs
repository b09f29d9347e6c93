//! In-memory timestamp provider for testing

use super::{LookupError, TimestampProvider};
use crate::core::entry::ModTime;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock timestamp provider.
///
/// Paths that were never added fail with `NotFound`; paths added through
/// [`MockTimestamps::deny`] fail with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MockTimestamps {
    times: HashMap<PathBuf, ModTime>,
    denied: Vec<PathBuf>,
    lookups: Cell<usize>,
}

impl MockTimestamps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file modified `secs` seconds after the epoch
    pub fn with_file(mut self, path: impl Into<PathBuf>, secs: i64) -> Self {
        self.times.insert(path.into(), ModTime::from_unix_seconds(secs));
        self
    }

    pub fn with_time(mut self, path: impl Into<PathBuf>, time: ModTime) -> Self {
        self.times.insert(path.into(), time);
        self
    }

    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.push(path.into());
        self
    }

    /// Number of lookups performed so far
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl TimestampProvider for MockTimestamps {
    fn modified(&self, path: &Path) -> Result<ModTime, LookupError> {
        self.lookups.set(self.lookups.get() + 1);
        if self.denied.iter().any(|p| p == path) {
            return Err(LookupError::PermissionDenied(path.to_path_buf()));
        }
        self.times
            .get(path)
            .copied()
            .ok_or_else(|| LookupError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_paths() {
        let mock = MockTimestamps::new().with_file("/a", 5);
        assert_eq!(mock.modified(Path::new("/a")).unwrap().unix_seconds(), 5);
        assert!(matches!(
            mock.modified(Path::new("/b")),
            Err(LookupError::NotFound(_))
        ));
        assert_eq!(mock.lookups(), 2);
    }

    #[test]
    fn test_denied_path() {
        let mock = MockTimestamps::new().with_file("/secret", 1).deny("/secret");
        assert!(matches!(
            mock.modified(Path::new("/secret")),
            Err(LookupError::PermissionDenied(_))
        ));
    }
}
