/*!
 * Per-run selection statistics
 */

use std::io::{self, Write};
use tracing::info;

/// Counters collected while selecting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Records read from the input
    pub records_read: u64,
    /// Records whose timestamp lookup succeeded
    pub resolved: u64,
    /// Records dropped because the lookup failed
    pub skipped: u64,
    /// Entries stored in the heap, including those that displaced another
    pub admitted: u64,
    /// Entries pushed out by a more recent one
    pub evicted: u64,
    /// Entries turned away by a full heap
    pub rejected: u64,
    /// Entries handed to the presenter
    pub emitted: u64,
}

impl SelectionStats {
    /// Emit the counters as a single structured log event
    pub fn log_summary(&self) {
        info!(
            records_read = self.records_read,
            resolved = self.resolved,
            skipped = self.skipped,
            admitted = self.admitted,
            evicted = self.evicted,
            rejected = self.rejected,
            emitted = self.emitted,
            "selection finished"
        );
    }

    /// Write a human-readable summary
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "recentmost statistics")?;
        writeln!(out, "  Records read: {}", self.records_read)?;
        writeln!(out, "  Resolved:     {}", self.resolved)?;
        writeln!(out, "  Skipped:      {}", self.skipped)?;
        writeln!(out, "  Admitted:     {}", self.admitted)?;
        writeln!(out, "  Evicted:      {}", self.evicted)?;
        writeln!(out, "  Rejected:     {}", self.rejected)?;
        writeln!(out, "  Emitted:      {}", self.emitted)?;
        Ok(())
    }

    /// Print the summary to stderr, leaving stdout to the selected paths
    pub fn print_summary(&self) -> io::Result<()> {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        self.write_summary(&mut out)?;
        out.flush()
    }
}
