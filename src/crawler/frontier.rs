//! Frontier queue for the crawl
//!
//! This module handles:
//! - FIFO (breadth-first) ordering of URLs awaiting a visit
//! - Deduplication on insertion against queued and visited URLs

use std::collections::{HashSet, VecDeque};

/// FIFO queue of canonical URLs that have not been visited yet
///
/// A URL is never present twice at once: [`Frontier::push`] refuses URLs that
/// are already queued or that the caller reports as visited.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// URLs in visitation order
    queue: VecDeque<String>,

    /// Mirror of `queue` for O(1) membership checks
    queued: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding a single seed URL
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed, &HashSet::new());
        frontier
    }

    /// Appends a URL to the tail unless it is empty, queued or visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was added
    pub fn push(&mut self, url: impl Into<String>, visited: &HashSet<String>) -> bool {
        let url = url.into();
        if url.is_empty() || visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }

        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the URL at the front
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    /// Returns true if the URL is currently queued
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates queued URLs front to back
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }
}
