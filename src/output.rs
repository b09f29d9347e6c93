//! Rendering of selected entries: plain records or JSON Lines.

use std::io::Write;
use std::path::Path;

use chrono::{Local, Utc};
use serde::Serialize;

use crate::config::{OutputFormat, SelectConfig, TimeZoneMode};
use crate::core::entry::{Entry, ModTime};
use crate::error::Result;

/// Display format of the timestamp column
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Structured record for JSON output
#[derive(Debug, Serialize)]
pub struct JsonRecord {
    pub path: String,
    pub modified: String,
    pub modified_unix: i64,
    pub modified_nanos: u32,
    pub sequence: u64,
}

/// Writes entries to an output stream
#[derive(Debug, Clone)]
pub struct Presenter {
    format: OutputFormat,
    show_time: bool,
    time_zone: TimeZoneMode,
    terminator: u8,
}

impl Presenter {
    pub fn new(format: OutputFormat, show_time: bool, time_zone: TimeZoneMode, terminator: u8) -> Self {
        Self {
            format,
            show_time,
            time_zone,
            terminator,
        }
    }

    pub fn from_config(config: &SelectConfig) -> Self {
        Self::new(
            config.format,
            config.prints_time(),
            config.time_zone,
            config.delimiter.byte(),
        )
    }

    /// `YYYY-MM-DD HH:MM:SS` in the configured zone.
    ///
    /// Timestamps chrono cannot represent fall back to raw epoch seconds.
    pub fn format_timestamp(&self, time: ModTime) -> String {
        let formatted = match self.time_zone {
            TimeZoneMode::Local => time
                .to_datetime(&Local)
                .map(|dt| dt.format(TIME_FORMAT).to_string()),
            TimeZoneMode::Utc => time
                .to_datetime(&Utc)
                .map(|dt| dt.format(TIME_FORMAT).to_string()),
        };
        formatted.unwrap_or_else(|| time.unix_seconds().to_string())
    }

    fn rfc3339(&self, time: ModTime) -> String {
        let formatted = match self.time_zone {
            TimeZoneMode::Local => time.to_datetime(&Local).map(|dt| dt.to_rfc3339()),
            TimeZoneMode::Utc => time.to_datetime(&Utc).map(|dt| dt.to_rfc3339()),
        };
        formatted.unwrap_or_else(|| time.unix_seconds().to_string())
    }

    /// Write one record followed by the terminator
    pub fn write_entry<W: Write>(&self, out: &mut W, entry: &Entry) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                if self.show_time {
                    write!(out, "{} ", self.format_timestamp(entry.modtime()))?;
                }
                write_path(out, entry.path())?;
            }
            OutputFormat::Json => {
                let record = JsonRecord {
                    path: entry.path().to_string_lossy().into_owned(),
                    modified: self.rfc3339(entry.modtime()),
                    modified_unix: entry.modtime().unix_seconds(),
                    modified_nanos: entry.modtime().subsec_nanos(),
                    sequence: entry.sequence(),
                };
                serde_json::to_writer(&mut *out, &record)?;
            }
        }
        out.write_all(&[self.terminator])?;
        Ok(())
    }

    /// Write every entry and flush
    pub fn write_all<'a, W, I>(&self, out: &mut W, entries: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Entry>,
    {
        for entry in entries {
            self.write_entry(out, entry)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(unix)]
fn write_path<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    out.write_all(path.to_string_lossy().as_bytes())
}
