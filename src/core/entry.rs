/*!
 * File entries and their modification timestamps
 */

use chrono::{DateTime, TimeZone};
use filetime::FileTime;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Modification timestamp of a file.
///
/// Seconds since the Unix epoch plus a sub-second part. Ordering is by
/// seconds first, then nanoseconds, so platforms that only report whole
/// seconds compare exactly like the classic `st_mtime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModTime {
    secs: i64,
    nanos: u32,
}

impl ModTime {
    /// The Unix epoch itself
    pub const EPOCH: ModTime = ModTime { secs: 0, nanos: 0 };

    /// Build a timestamp from seconds and nanoseconds since the epoch.
    ///
    /// Nanoseconds above one second are carried into the seconds part.
    pub fn new(secs: i64, nanos: u32) -> Self {
        let carry = i64::from(nanos / 1_000_000_000);
        Self {
            secs: secs.saturating_add(carry),
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Timestamp with whole-second precision
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    pub fn unix_seconds(&self) -> i64 {
        self.secs
    }

    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Drop the sub-second part
    pub fn truncated_to_seconds(self) -> Self {
        Self::from_unix_seconds(self.secs)
    }

    /// Render in the given time zone.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn to_datetime<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_opt(self.secs, self.nanos).single()
    }
}

impl From<FileTime> for ModTime {
    fn from(ft: FileTime) -> Self {
        Self::new(ft.unix_seconds(), ft.nanoseconds())
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self::new(after.as_secs() as i64, after.subsec_nanos()),
            Err(err) => {
                // Before the epoch: borrow a second when there is a sub-second part
                let before = err.duration();
                let secs = -(before.as_secs() as i64);
                match before.subsec_nanos() {
                    0 => Self::new(secs, 0),
                    n => Self::new(secs - 1, 1_000_000_000 - n),
                }
            }
        }
    }
}

/// One file as it was when inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    modtime: ModTime,
    sequence: u64,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, modtime: ModTime, sequence: u64) -> Self {
        Self {
            path: path.into(),
            modtime,
            sequence,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modtime(&self) -> ModTime {
        self.modtime
    }

    /// Order in which this entry was created during the run (diagnostics only)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Hands out increasing sequence ids for one run, starting at 1
#[derive(Debug, Default)]
pub struct SequenceCounter {
    issued: u64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
