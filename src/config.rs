/*!
 * Configuration types for recentmost
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RecentError, Result};

/// Main configuration for a selection run.
///
/// Everything except the file count can come from a TOML file; command line
/// flags are applied on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Record separator for input and output
    #[serde(default)]
    pub delimiter: Delimiter,

    /// Print the modification time before each path
    #[serde(default = "default_true")]
    pub show_time: bool,

    /// Presentation order of the selected entries
    #[serde(default)]
    pub order: OutputOrder,

    /// Time zone used when printing timestamps
    #[serde(default)]
    pub time_zone: TimeZoneMode,

    /// Granularity at which timestamps are compared
    #[serde(default)]
    pub precision: Precision,

    /// Output record format
    #[serde(default)]
    pub format: OutputFormat,

    /// Print selection statistics to stderr at the end of the run
    #[serde(default)]
    pub show_stats: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            show_time: true,
            order: OutputOrder::default(),
            time_zone: TimeZoneMode::default(),
            precision: Precision::default(),
            format: OutputFormat::default(),
            show_stats: false,
            log_level: default_log_level(),
            log_file: None,
            verbose: false,
        }
    }
}

/// Byte that separates records on stdin and terminates them on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Newline,
    Nul,
}

impl Delimiter {
    pub fn byte(&self) -> u8 {
        match self {
            Delimiter::Newline => b'\n',
            Delimiter::Nul => b'\0',
        }
    }
}

/// Order in which selected entries are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputOrder {
    /// Most recently modified first
    #[default]
    NewestFirst,

    /// Oldest of the selected entries first (heap drain order)
    OldestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    #[default]
    Local,
    Utc,
}

/// Timestamp granularity used for ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Whatever the filesystem reports, down to nanoseconds
    #[default]
    Full,

    /// Whole seconds; files modified within the same second tie
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[timestamp ]path` records
    #[default]
    Text,

    /// One JSON object per record
    Json,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    #[default]
    Warn,

    /// Info, warnings, and errors
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl SelectConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RecentError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| RecentError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RecentError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Whether the text output carries a timestamp column.
    ///
    /// NUL-separated output is meant for `xargs -0` and friends, so it never
    /// carries one.
    pub fn prints_time(&self) -> bool {
        self.show_time && self.delimiter == Delimiter::Newline
    }
}
