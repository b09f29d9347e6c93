/*!
 * Streaming selection: paths in, the most recent entries out
 */

use std::io::BufRead;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::config::{OutputOrder, Precision, SelectConfig};
use crate::core::entry::{Entry, SequenceCounter};
use crate::core::heap::{BoundedTopHeap, OfferOutcome};
use crate::error::{RecentError, Result};
use crate::input::{into_path, LineSource};
use crate::stats::SelectionStats;
use crate::system::TimestampProvider;

/// Final result of a run
#[derive(Debug)]
pub struct Selection {
    /// Selected entries in presentation order
    pub entries: Vec<Entry>,
    pub stats: SelectionStats,
}

/// Drives paths through a timestamp provider into a bounded heap
#[derive(Debug)]
pub struct Selector<P> {
    provider: P,
    heap: BoundedTopHeap,
    precision: Precision,
    sequence: SequenceCounter,
    stats: SelectionStats,
}

impl<P: TimestampProvider> Selector<P> {
    pub fn new(provider: P, capacity: usize, precision: Precision) -> Result<Self> {
        let heap = BoundedTopHeap::new(capacity)?;
        debug!(capacity, ?precision, "selector ready");

        Ok(Self {
            provider,
            heap,
            precision,
            sequence: SequenceCounter::new(),
            stats: SelectionStats::default(),
        })
    }

    /// Look up one path and offer it to the heap.
    ///
    /// Returns whether the path is now among the retained entries. A failed
    /// lookup is logged and the path dropped.
    pub fn offer_path(&mut self, path: PathBuf) -> bool {
        self.stats.records_read += 1;

        let modtime = match self.provider.modified(&path) {
            Ok(t) => t,
            Err(source) => {
                let err = RecentError::Lookup { path, source };
                debug!(category = %err.category(), "skipping: {}", err);
                self.stats.skipped += 1;
                return false;
            }
        };
        self.stats.resolved += 1;

        let modtime = match self.precision {
            Precision::Full => modtime,
            Precision::Seconds => modtime.truncated_to_seconds(),
        };

        let entry = Entry::new(path, modtime, self.sequence.next_id());
        match self.heap.offer(entry) {
            OfferOutcome::Admitted => {
                self.stats.admitted += 1;
                true
            }
            OfferOutcome::Evicted(old) => {
                trace!(path = %old.path().display(), sequence = old.sequence(), "evicted");
                self.stats.admitted += 1;
                self.stats.evicted += 1;
                true
            }
            OfferOutcome::Rejected(entry) => {
                trace!(path = %entry.path().display(), sequence = entry.sequence(), "rejected");
                self.stats.rejected += 1;
                false
            }
        }
    }

    /// Offer every record of `source`. Read errors end the run.
    pub fn ingest<R: BufRead>(&mut self, source: &mut LineSource<R>) -> Result<()> {
        while let Some(record) = source.next_record()? {
            self.offer_path(into_path(record));
        }
        Ok(())
    }

    /// Number of entries currently retained
    pub fn retained(&self) -> usize {
        self.heap.len()
    }

    pub fn stats(&self) -> &SelectionStats {
        &self.stats
    }

    /// Drain the heap into presentation order
    pub fn finish(self, order: OutputOrder) -> Selection {
        let entries = self.heap.into_sorted_vec(order);
        let mut stats = self.stats;
        stats.emitted = entries.len() as u64;
        stats.log_summary();
        Selection { entries, stats }
    }
}

/// Run a full selection over `input`
pub fn select<R, P>(input: R, provider: P, count: usize, config: &SelectConfig) -> Result<Selection>
where
    R: BufRead,
    P: TimestampProvider,
{
    let mut selector = Selector::new(provider, count, config.precision)?;
    let mut source = LineSource::new(input, config.delimiter.byte());
    selector.ingest(&mut source)?;
    Ok(selector.finish(config.order))
}
