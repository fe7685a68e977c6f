//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Seeding and draining the frontier
//! - Visited-set bookkeeping and the page budget
//! - Fetching, parsing, and link extraction
//! - The politeness delay between visits

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchResult, Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::output::CrawlResult;
use crate::url::{canonicalize, same_domain};
use crate::{CrawlerError, UrlError};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// The frontier may still hold work and the budget is not exhausted
    Running,
    /// Frontier empty or budget reached; no further fetches happen
    Done,
}

/// Crawl engine for a single registered domain
///
/// Owns the frontier, visited set and accumulated results for exactly one run.
/// Fetches are issued one at a time; the only suspension points are the fetch
/// itself and the politeness delay.
pub struct Crawler<F> {
    /// Canonical seed URL, also the reference for domain scoping
    base: String,

    /// Maximum number of distinct visitation attempts
    max_pages: usize,

    /// Pause between consecutive visits
    delay: Duration,

    fetcher: F,
    frontier: Frontier,
    visited: HashSet<String>,
    result: CrawlResult,
    state: CrawlState,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler seeded with the canonical form of `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - The seed URL; its registered domain bounds the crawl
    /// * `config` - Page budget and politeness delay
    /// * `fetcher` - Transport used for every page fetch
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlerError)` - The seed URL has no canonical form
    pub fn new(base_url: &str, config: &CrawlerConfig, fetcher: F) -> Result<Self, CrawlerError> {
        let base = canonicalize(base_url);
        if base.is_empty() {
            return Err(UrlError::Malformed(format!("cannot crawl from {:?}", base_url)).into());
        }

        let delay = Duration::try_from_secs_f64(config.delay_secs).map_err(|e| {
            crate::ConfigError::Validation(format!(
                "invalid delay {}: {}",
                config.delay_secs, e
            ))
        })?;

        Ok(Self {
            frontier: Frontier::with_seed(base.clone()),
            base,
            max_pages: config.max_pages,
            delay,
            fetcher,
            visited: HashSet::new(),
            result: CrawlResult::default(),
            state: CrawlState::Running,
        })
    }

    /// Canonical seed URL
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URLs waiting to be visited
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// URLs already visited, successfully or not
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Results accumulated so far
    pub fn result(&self) -> &CrawlResult {
        &self.result
    }

    /// Runs the crawl to completion and returns its results
    ///
    /// Consumes the crawler: the frontier and visited set are discarded and
    /// only the [`CrawlResult`] survives.
    pub async fn run(mut self) -> CrawlResult {
        tracing::info!(
            "Starting crawl of {} (max {} pages, delay {:?})",
            self.base,
            self.max_pages,
            self.delay
        );
        let start_time = Instant::now();

        while self.step().await == CrawlState::Running {}

        tracing::info!(
            "Crawl completed: {} pages fetched, {} URLs visited in {:?}",
            self.result.pages.len(),
            self.visited.len(),
            start_time.elapsed()
        );

        self.result
    }

    /// Performs one transition of the crawl state machine
    ///
    /// 1. Finish if the frontier is empty or the budget is spent
    /// 2. Pop the next URL and re-canonicalize it
    /// 3. Discard it if invalid, already visited, or off-domain
    /// 4. Mark it visited and fetch it; failures are logged and skipped
    /// 5. On success record the body and forms and enqueue new same-domain links
    /// 6. Pause for the politeness delay if more work remains
    ///
    /// Failed fetches consume the budget just like successful ones, so
    /// `max_pages` bounds visitation attempts rather than stored pages.
    pub async fn step(&mut self) -> CrawlState {
        if self.state == CrawlState::Done {
            return CrawlState::Done;
        }

        if self.visited.len() >= self.max_pages {
            tracing::info!("Page budget of {} reached", self.max_pages);
            self.state = CrawlState::Done;
            return CrawlState::Done;
        }

        let popped = match self.frontier.pop() {
            Some(url) => url,
            None => {
                tracing::info!("Frontier is empty, crawl complete");
                self.state = CrawlState::Done;
                return CrawlState::Done;
            }
        };

        let url = canonicalize(&popped);
        if url.is_empty() {
            tracing::debug!("Discarding invalid URL {:?}", popped);
            self.result.stats.skipped_invalid += 1;
            return CrawlState::Running;
        }

        if self.visited.contains(&url) {
            tracing::debug!("Already visited {}", url);
            self.result.stats.skipped_visited += 1;
            return CrawlState::Running;
        }

        if !same_domain(&self.base, &url) {
            tracing::debug!("Outside {}: {}", self.base, url);
            self.result.stats.skipped_offsite += 1;
            return CrawlState::Running;
        }

        // Marked before fetching so a failed URL is never retried and a
        // page's links back to itself are never re-queued
        self.visited.insert(url.clone());
        self.result.stats.attempted += 1;
        tracing::debug!("Fetching {}", url);

        let outcome = self.fetcher.fetch(&url).await;
        match outcome {
            FetchResult::Success { body, .. } => self.record_page(url, body),
            failure => {
                let reason = failure
                    .failure_reason()
                    .unwrap_or_else(|| "unknown error".to_string());
                tracing::warn!("Skip {} ({})", url, reason);
                self.result.stats.failed += 1;
            }
        }

        if self.result.stats.attempted % 10 == 0 {
            tracing::info!(
                "Progress: {} visited, {} fetched, {} in frontier",
                self.visited.len(),
                self.result.pages.len(),
                self.frontier.len()
            );
        }

        if !self.frontier.is_empty() && self.visited.len() < self.max_pages {
            self.pause().await;
        }

        CrawlState::Running
    }

    /// Stores a fetched page, its forms, and enqueues its new links
    fn record_page(&mut self, url: String, body: String) {
        self.result.stats.fetched += 1;

        let page_url = match Url::parse(&url) {
            Ok(page_url) => page_url,
            Err(e) => {
                tracing::warn!("Cannot parse fetched URL {}: {}", url, e);
                self.result.pages.insert(url, body);
                return;
            }
        };

        let parsed = parse_html(&body, &page_url);
        tracing::debug!(
            "Parsed {} ({:?}): {} links, {} forms",
            url,
            parsed.title,
            parsed.links.len(),
            parsed.forms.len()
        );

        for link in parsed.links {
            if !same_domain(&self.base, &link) {
                self.result.stats.skipped_offsite += 1;
                continue;
            }

            if self.frontier.push(link, &self.visited) {
                self.result.stats.links_enqueued += 1;
            }
        }

        if !parsed.forms.is_empty() {
            self.result.stats.forms_found += parsed.forms.len() as u64;
            self.result.forms.insert(url.clone(), parsed.forms);
        }

        self.result.pages.insert(url, body);
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Runs a complete crawl with the HTTP fetcher described by `config`
///
/// # Arguments
///
/// * `base_url` - The seed URL
/// * `config` - Crawler and user agent configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl finished
/// * `Err(CrawlerError)` - The seed URL was invalid or the HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use single_domain_crawler::config::Config;
/// use single_domain_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = run_crawl("https://example.com/", &Config::default()).await?;
/// println!("{} pages", result.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(base_url: &str, config: &Config) -> Result<CrawlResult, CrawlerError> {
    let fetcher = HttpFetcher::new(
        &config.user_agent,
        Duration::from_secs(config.crawler.timeout_secs),
    )?;
    let crawler = Crawler::new(base_url, &config.crawler, fetcher)?;
    Ok(crawler.run().await)
}
