// src/search/finder.rs
// =============================================================================
// This module finds a chain of links from one article to another using
// breadth-first search.
//
// How it works:
// 1. Start with the start URL in a queue (the "frontier")
// 2. Take the first page off the queue
// 3. If it's the target, walk back through the predecessors: that's the path
// 4. Otherwise fetch the page and queue every article link not seen before
// 5. Repeat until the target is found or the queue is empty
//
// A URL is marked visited when it is *queued*, not when it is fetched. That
// way no URL is ever queued twice, even if many pages link to it.
//
// Pages are fetched one at a time. A page that fails to load is logged and
// skipped; only an empty queue (or a configured limit) ends the search
// without a path.
//
// Rust concepts:
// - VecDeque: FIFO queue (push_back / pop_front) for breadth-first order
// - HashSet::insert returns false for repeats: check and mark in one call
// - &dyn Trait: the fetcher and the log are passed in, not global
// =============================================================================

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::arena::SearchTree;
use super::log::VisitLog;
use crate::error::{Limit, SearchError};
use crate::page::{PageFetcher, PageLinks};

/// Optional guards against crawling forever. Both default to "no limit".
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum number of pages fetched
    pub max_pages: Option<usize>,
    /// Maximum wall-clock time for the whole search
    pub max_duration: Option<Duration>,
}

impl SearchLimits {
    // Returns the first limit that has run out, if any
    fn exhausted(&self, pages_fetched: usize, elapsed: Duration) -> Option<Limit> {
        if let Some(max) = self.max_pages {
            if pages_fetched >= max {
                return Some(Limit::Pages(max));
            }
        }
        if let Some(max) = self.max_duration {
            if elapsed >= max {
                return Some(Limit::Duration(max));
            }
        }
        None
    }
}

/// One step of a found path: the page reached and the sentence linking to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub url: String,
    pub context_sentence: String,
}

/// A successful search.
#[derive(Debug, Clone, Serialize)]
pub struct FoundPath {
    pub start: String,
    pub end: String,
    /// Steps after the start page; empty when start == end
    pub steps: Vec<PathStep>,
    /// Number of nodes taken off the frontier
    pub pages_visited: usize,
}

// Finds a path of article links from start_url to end_url
//
// Parameters:
//   start_url, end_url: canonical absolute URLs (compared as plain strings)
//   fetcher: lists the article links of a page
//   log: receives one event per visited node and per failed fetch
//   limits: optional page-count / time guards
//
// Returns: the path on success, SearchError otherwise
//
// Example:
//   A links to B, B links to C
//   find_path("A", "C", ...) -> steps [B, C]
pub async fn find_path(
    start_url: &str,
    end_url: &str,
    fetcher: &dyn PageFetcher,
    log: &mut dyn VisitLog,
    limits: &SearchLimits,
) -> Result<FoundPath, SearchError> {
    let started = Instant::now();

    let mut tree = SearchTree::new();
    let mut frontier = VecDeque::new();
    let mut visited = HashSet::new();

    let root = tree.push_root(start_url.to_string());
    visited.insert(start_url.to_string());
    frontier.push_back(root);

    let mut pages_visited = 0;
    let mut pages_fetched = 0;

    while let Some(current) = frontier.pop_front() {
        // Cloned because the tree grows while we still need the URL
        let url = tree.get(current).url.clone();

        pages_visited += 1;
        log.visited(&url);
        debug!(url = %url, queued = frontier.len(), "visiting");

        if url == end_url {
            let steps: Vec<PathStep> = tree
                .path_to(current)
                .into_iter()
                .map(|node| PathStep {
                    url: node.url.clone(),
                    context_sentence: node.context_sentence.clone(),
                })
                .collect();

            info!(
                steps = steps.len(),
                pages_visited,
                discovered = tree.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "path found"
            );

            return Ok(FoundPath {
                start: start_url.to_string(),
                end: end_url.to_string(),
                steps,
                pages_visited,
            });
        }

        if let Some(limit) = limits.exhausted(pages_fetched, started.elapsed()) {
            warn!(%limit, pages_visited, "search limit reached");
            return Err(SearchError::LimitReached {
                limit,
                pages_visited,
            });
        }

        pages_fetched += 1;
        let links: PageLinks = match fetcher.fetch_links(&url).await {
            Ok(links) => links,
            Err(e) => {
                // One broken page must not end the search
                warn!(url = %url, error = %e, "skipping page");
                log.fetch_failed(&url, &e);
                continue;
            }
        };

        for link in links {
            if visited.insert(link.url.clone()) {
                let child = tree.push_child(current, link.url, link.context_sentence);
                frontier.push_back(child);
            }
        }
    }

    info!(pages_visited, "frontier exhausted");

    Err(SearchError::PathNotFound {
        start: start_url.to_string(),
        end: end_url.to_string(),
        pages_visited,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does BFS give the shortest path?
//    - Everything one click away is queued before anything two clicks away
//    - So the first time we pop the target, no shorter chain exists
//
// 2. Why `if visited.insert(...)` instead of contains() then insert()?
//    - insert() returns true only if the value was new
//    - One lookup does both the check and the mark
//
// 3. Why &dyn PageFetcher and &mut dyn VisitLog?
//    - The search doesn't care whether pages come from the network or from a
//      HashMap in a test, or whether the log is a file or a Vec
//    - &mut because writing a log line changes the log
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::search::log::MemoryVisitLog;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // An in-memory link graph standing in for the network
    #[derive(Default)]
    struct GraphFetcher {
        edges: HashMap<String, Vec<String>>,
        failing: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl GraphFetcher {
        fn edge(mut self, from: &str, to: &[&str]) -> Self {
            self.edges.insert(
                from.to_string(),
                to.iter().map(|t| t.to_string()).collect(),
            );
            self
        }

        fn failing(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for GraphFetcher {
        async fn fetch_links(&self, page_url: &str) -> Result<PageLinks, FetchError> {
            self.calls.lock().unwrap().push(page_url.to_string());

            if self.failing.contains(page_url) {
                return Err(FetchError::Status {
                    url: page_url.to_string(),
                    status: 503,
                });
            }

            Ok(self
                .edges
                .get(page_url)
                .into_iter()
                .flatten()
                .map(|to| (to.clone(), format!("{} mentions {}.", page_url, to)))
                .collect())
        }
    }

    fn urls(path: &FoundPath) -> Vec<&str> {
        path.steps.iter().map(|s| s.url.as_str()).collect()
    }

    async fn run(
        fetcher: &GraphFetcher,
        start: &str,
        end: &str,
    ) -> (Result<FoundPath, SearchError>, MemoryVisitLog) {
        let mut log = MemoryVisitLog::default();
        let result = find_path(start, end, fetcher, &mut log, &SearchLimits::default()).await;
        (result, log)
    }

    #[tokio::test]
    async fn test_self_loop_needs_no_fetch() {
        let fetcher = GraphFetcher::default().edge("A", &["B"]);
        let (result, log) = run(&fetcher, "A", "A").await;

        let path = result.unwrap();
        assert!(path.steps.is_empty());
        assert_eq!(path.pages_visited, 1);
        assert!(fetcher.calls().is_empty());
        assert_eq!(log.visited, vec!["A"]);
    }

    #[tokio::test]
    async fn test_unreachable_target() {
        let fetcher = GraphFetcher::default();
        let (result, log) = run(&fetcher, "A", "B").await;

        assert_eq!(
            result.unwrap_err(),
            SearchError::PathNotFound {
                start: "A".to_string(),
                end: "B".to_string(),
                pages_visited: 1,
            }
        );
        assert_eq!(log.visited, vec!["A"]);
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_finds_shortest_path() {
        // A -> X1 -> X2 -> X3 -> T is long, A -> Y -> T is short
        let fetcher = GraphFetcher::default()
            .edge("A", &["X1", "Y"])
            .edge("X1", &["X2"])
            .edge("X2", &["X3"])
            .edge("X3", &["T"])
            .edge("Y", &["T"]);
        let (result, _) = run(&fetcher, "A", "T").await;

        let path = result.unwrap();
        assert_eq!(urls(&path), vec!["Y", "T"]);
        assert_eq!(path.steps[0].context_sentence, "A mentions Y.");
        assert_eq!(path.steps[1].context_sentence, "Y mentions T.");
    }

    #[tokio::test]
    async fn test_expands_layer_by_layer() {
        let fetcher = GraphFetcher::default()
            .edge("A", &["B", "C"])
            .edge("B", &["D"])
            .edge("C", &["E"])
            .edge("D", &["F"]);
        let (result, log) = run(&fetcher, "A", "missing").await;

        assert!(matches!(result, Err(SearchError::PathNotFound { .. })));
        assert_eq!(log.visited, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[tokio::test]
    async fn test_no_duplicate_visits() {
        // Every page links to every other page, including itself
        let all: &[&str] = &["A", "B", "C", "D"];
        let fetcher = GraphFetcher::default()
            .edge("A", all)
            .edge("B", all)
            .edge("C", all)
            .edge("D", all);
        let (result, log) = run(&fetcher, "A", "Z").await;

        assert!(result.is_err());
        let mut calls = fetcher.calls();
        calls.sort();
        assert_eq!(calls, vec!["A", "B", "C", "D"]);
        assert_eq!(log.visited.len(), 4);
        let unique: HashSet<_> = log.visited.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_page_on_only_path() {
        let fetcher = GraphFetcher::default()
            .edge("A", &["M"])
            .edge("M", &["T"])
            .failing("M");
        let (result, log) = run(&fetcher, "A", "T").await;

        assert!(matches!(result, Err(SearchError::PathNotFound { .. })));
        assert_eq!(log.failed, vec!["M"]);
    }

    #[tokio::test]
    async fn test_failed_page_with_alternate_path() {
        let fetcher = GraphFetcher::default()
            .edge("A", &["M", "N"])
            .edge("M", &["T"])
            .edge("N", &["T"])
            .failing("M");
        let (result, log) = run(&fetcher, "A", "T").await;

        let path = result.unwrap();
        assert_eq!(urls(&path), vec!["N", "T"]);
        assert_eq!(log.failed, vec!["M"]);
    }

    #[tokio::test]
    async fn test_failed_start_page() {
        let fetcher = GraphFetcher::default().edge("A", &["B"]).failing("A");
        let (result, log) = run(&fetcher, "A", "B").await;

        assert!(matches!(result, Err(SearchError::PathNotFound { .. })));
        assert_eq!(log.failed, vec!["A"]);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let fetcher = GraphFetcher::default().edge("A", &["B"]).edge("B", &["C"]);
        let mut log = MemoryVisitLog::default();
        let limits = SearchLimits {
            max_pages: Some(1),
            max_duration: None,
        };

        let result = find_path("A", "C", &fetcher, &mut log, &limits).await;

        assert_eq!(
            result.unwrap_err(),
            SearchError::LimitReached {
                limit: Limit::Pages(1),
                pages_visited: 2,
            }
        );
        assert_eq!(fetcher.calls(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_time_limit() {
        let fetcher = GraphFetcher::default().edge("A", &["B"]);
        let mut log = MemoryVisitLog::default();
        let limits = SearchLimits {
            max_pages: None,
            max_duration: Some(Duration::ZERO),
        };

        let result = find_path("A", "B", &fetcher, &mut log, &limits).await;
        assert!(matches!(
            result,
            Err(SearchError::LimitReached {
                limit: Limit::Duration(_),
                ..
            })
        ));
        assert!(fetcher.calls().is_empty());

        // The target check comes before the limits
        let result = find_path("A", "A", &fetcher, &mut log, &limits).await;
        assert!(result.unwrap().steps.is_empty());
    }
}
