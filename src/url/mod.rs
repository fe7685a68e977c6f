//! URL handling module
//!
//! This module provides URL canonicalization and registered-domain matching,
//! the two pure functions the crawl engine uses to decide whether two links
//! name the same page and whether a link stays inside the crawled site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{registered_domain, same_domain};
pub use normalize::{canonicalize, canonicalize_parsed};
