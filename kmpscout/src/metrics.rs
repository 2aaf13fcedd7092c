use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks work done by parallel searches.
///
/// Clones share the same counters, so a single instance can be handed to
/// every worker of a search and read back by the caller afterwards.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    searches: Arc<AtomicU64>,

    // Partitioning metrics
    segments_scanned: Arc<AtomicU64>,
    symbols_scanned: Arc<AtomicU64>,

    // Boundary ownership metrics
    candidates_found: Arc<AtomicU64>,
    candidates_discarded: Arc<AtomicU64>,
    matches_accepted: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            searches: Arc::new(AtomicU64::new(0)),
            segments_scanned: Arc::new(AtomicU64::new(0)),
            symbols_scanned: Arc::new(AtomicU64::new(0)),
            candidates_found: Arc::new(AtomicU64::new(0)),
            candidates_discarded: Arc::new(AtomicU64::new(0)),
            matches_accepted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records the start of a search
    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one segment worker finishing.
    ///
    /// `window_len` is the length of the scan window including padding, so
    /// the symbols re-scanned in overlap regions show up in the total.
    pub fn record_segment(&self, window_len: u64, found: u64, accepted: u64) {
        self.segments_scanned.fetch_add(1, Ordering::Relaxed);
        self.symbols_scanned.fetch_add(window_len, Ordering::Relaxed);
        self.candidates_found.fetch_add(found, Ordering::Relaxed);
        self.candidates_discarded
            .fetch_add(found - accepted, Ordering::Relaxed);
        self.matches_accepted.fetch_add(accepted, Ordering::Relaxed);
        debug!(
            "Segment scanned {} symbols: {} candidates, {} owned",
            window_len, found, accepted
        );
    }

    /// Gets current statistics
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            searches: self.searches.load(Ordering::Relaxed),
            segments_scanned: self.segments_scanned.load(Ordering::Relaxed),
            symbols_scanned: self.symbols_scanned.load(Ordering::Relaxed),
            candidates_found: self.candidates_found.load(Ordering::Relaxed),
            candidates_discarded: self.candidates_discarded.load(Ordering::Relaxed),
            matches_accepted: self.matches_accepted.load(Ordering::Relaxed),
        }
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Searches: {}\n\
             Segments scanned: {}\n\
             Symbols scanned: {}\n\
             Candidates found/discarded: {}/{}\n\
             Matches accepted: {}",
            stats.searches,
            stats.segments_scanned,
            stats.symbols_scanned,
            stats.candidates_found,
            stats.candidates_discarded,
            stats.matches_accepted
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub searches: u64,
    pub segments_scanned: u64,
    pub symbols_scanned: u64,
    pub candidates_found: u64,
    pub candidates_discarded: u64,
    pub matches_accepted: u64,
}
