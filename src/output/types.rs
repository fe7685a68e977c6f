//! Crawl result types and output errors
//!
//! This module defines the data a crawl run hands back to its caller and the
//! error type for persisting it.

use crate::output::stats::CrawlStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One field of an HTML form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    /// Declared `type` attribute, `text` when absent
    #[serde(rename = "type")]
    pub input_type: String,

    /// `name` attribute, if any
    pub name: Option<String>,

    /// `value` attribute, empty when absent
    pub value: String,
}

/// An HTML form found on a crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// Upper-cased submission method, `GET` when absent
    pub method: String,

    /// Absolute submission target, the page itself when absent
    pub action: String,

    /// `input`, `textarea`, `select` and `button` fields in document order
    pub inputs: Vec<FormInput>,
}

/// Everything one crawl run produced
///
/// Maps are keyed by canonical URL. Pages whose fetch failed never appear in
/// `pages`, and pages without forms never appear in `forms`.
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// Canonical URL -> raw body
    pub pages: BTreeMap<String, String>,

    /// Canonical URL -> forms on that page
    pub forms: BTreeMap<String, Vec<FormDescriptor>>,

    /// Counters for the run
    pub stats: CrawlStats,
}

impl CrawlResult {
    /// Number of successfully fetched pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of forms across all pages
    pub fn form_count(&self) -> usize {
        self.forms.values().map(Vec::len).sum()
    }
}
