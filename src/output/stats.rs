//! Statistics for a crawl run
//!
//! The engine bumps these counters as it works through the frontier; the
//! binary logs them once the run is done.

/// Counters for one crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// URLs that consumed a visitation slot (fetched or failed)
    pub attempted: u64,

    /// Fetches that returned a body
    pub fetched: u64,

    /// Fetches that failed (non-2xx, timeout, transport error)
    pub failed: u64,

    /// Popped URLs dropped because they were already visited
    pub skipped_visited: u64,

    /// Popped or discovered URLs dropped for being outside the domain
    pub skipped_offsite: u64,

    /// Popped URLs dropped because their canonical form was empty
    pub skipped_invalid: u64,

    /// Links appended to the frontier
    pub links_enqueued: u64,

    /// Forms recorded across all pages
    pub forms_found: u64,
}

impl CrawlStats {
    /// Returns the fetch success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        (self.fetched as f64 / self.attempted as f64) * 100.0
    }
}

/// Logs statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!(
        "Visited {} URLs: {} fetched, {} failed ({:.1}% success)",
        stats.attempted,
        stats.fetched,
        stats.failed,
        stats.success_rate()
    );
    tracing::info!(
        "Enqueued {} links, recorded {} forms",
        stats.links_enqueued,
        stats.forms_found
    );
    tracing::debug!(
        "Skipped {} already visited, {} off-site, {} invalid",
        stats.skipped_visited,
        stats.skipped_offsite,
        stats.skipped_invalid
    );
}
