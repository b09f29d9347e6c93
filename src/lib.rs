/*!
 * recentmost - pick the N most recently modified files from a path list
 *
 * Reads paths (newline or NUL separated) from a stream, looks up each
 * file's modification time and keeps only the N most recent in a bounded
 * min-heap, so memory stays proportional to N however long the input is.
 *
 * ```no_run
 * use recentmost::{select, LocalTimestamps, Presenter, SelectConfig};
 *
 * let config = SelectConfig::default();
 * let stdin = std::io::stdin();
 * let selection = select(stdin.lock(), LocalTimestamps, 10, &config)?;
 * Presenter::from_config(&config).write_all(&mut std::io::stdout(), &selection.entries)?;
 * # Ok::<(), recentmost::RecentError>(())
 * ```
 */

pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod stats;
pub mod system;

// Re-export commonly used types
pub use config::{Delimiter, OutputFormat, OutputOrder, Precision, SelectConfig, TimeZoneMode};
pub use crate::core::{select, BoundedTopHeap, Entry, ModTime, OfferOutcome, Selection, Selector};
pub use error::{RecentError, Result};
pub use input::LineSource;
pub use output::Presenter;
pub use stats::SelectionStats;
pub use system::{LocalTimestamps, LookupError, TimestampProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
