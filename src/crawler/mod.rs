//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind an injectable [`Fetcher`] capability
//! - HTML parsing for links and forms
//! - The FIFO frontier with dedup-on-enqueue
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, CrawlState, Crawler};
pub use fetcher::{build_http_client, fetch_url, format_user_agent, FetchResult, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::{extract_forms, extract_links, parse_html, ParsedPage};
