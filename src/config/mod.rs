//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and merging command-line overrides on top of them.
//!
//! # Example
//!
//! ```no_run
//! use single_domain_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_config, ConfigOverrides};
