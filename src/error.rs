// src/error.rs
// =============================================================================
// Error types shared by the page fetcher, the path finder and the log sink.
//
// Three families, matching how the program reacts to them:
// - FetchError: one page could not be fetched. The search skips that page
//   and keeps going.
// - SearchError: the whole search failed (no path, or a limit ran out).
// - LogSinkError: the visit log file could not be opened. The program stops
//   before searching.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert a reqwest::Error automatically
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A single page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or transport failure (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The page URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Which search guard stopped the crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Pages(usize),
    Duration(Duration),
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Pages(n) => write!(f, "{} pages", n),
            Limit::Duration(d) => write!(f, "{:.1}s", d.as_secs_f64()),
        }
    }
}

/// The search ended without a path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Every reachable page was expanded and the target never showed up.
    #[error("no path from {start} to {end} (visited {pages_visited} pages)")]
    PathNotFound {
        start: String,
        end: String,
        pages_visited: usize,
    },

    /// A configured guard ran out before the target was reached.
    #[error("search limit of {limit} reached after visiting {pages_visited} pages")]
    LimitReached { limit: Limit, pages_visited: usize },
}

/// The visit log file could not be opened.
#[derive(Error, Debug)]
pub enum LogSinkError {
    #[error("cannot open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
