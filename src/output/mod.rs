//! Output module for crawl results
//!
//! This module handles:
//! - The result types a crawl run returns (pages, forms, statistics)
//! - Persisting results as a timestamped pair of JSON files
//! - Reporting run statistics

mod json;
pub mod stats;
mod types;

pub use json::{timestamp, write_crawl_result, write_crawl_result_with_stamp, OutputFiles};
pub use stats::{log_statistics, CrawlStats};
pub use types::{CrawlResult, FormDescriptor, FormInput, OutputError, OutputResult};
