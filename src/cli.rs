// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Both URLs are optional on the command line: if one is missing, main.rs
// asks for it on stdin instead.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "wiki-path",
    version,
    about = "Find a chain of links from one encyclopedia article to another",
    long_about = "wiki-path crawls article links breadth-first, starting at one page, until it \
                  reaches the target page. Every step is printed with the sentence its link \
                  appeared in."
)]
pub struct Cli {
    /// Article to start from (e.g., https://ru.wikipedia.org/wiki/Rust)
    ///
    /// Prompted for on stdin when omitted
    pub start_url: Option<String>,

    /// Article to reach
    ///
    /// Prompted for on stdin when omitted
    pub end_url: Option<String>,

    /// File that every visited page is appended to
    #[arg(long, default_value = "log.txt")]
    pub log_file: PathBuf,

    /// Site origin that article links are resolved against
    ///
    /// Defaults to the scheme and host of the start URL
    #[arg(long)]
    pub origin: Option<String>,

    /// Path prefix that marks article links
    #[arg(long, default_value = "/wiki/")]
    pub article_prefix: String,

    /// Stop after fetching this many pages (default: no limit)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Stop after this many seconds (default: no limit)
    #[arg(long)]
    pub max_seconds: Option<u64>,

    /// Timeout for each page request, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output the path in JSON format instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wiki-path"]);
        assert!(cli.start_url.is_none());
        assert_eq!(cli.log_file, PathBuf::from("log.txt"));
        assert_eq!(cli.article_prefix, "/wiki/");
        assert_eq!(cli.timeout, 10);
        assert!(cli.max_pages.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_positional_urls_and_limits() {
        let cli = Cli::parse_from([
            "wiki-path",
            "https://en.wikipedia.org/wiki/A",
            "https://en.wikipedia.org/wiki/B",
            "--max-pages",
            "500",
            "--max-seconds",
            "60",
            "--json",
        ]);
        assert_eq!(cli.start_url.as_deref(), Some("https://en.wikipedia.org/wiki/A"));
        assert_eq!(cli.end_url.as_deref(), Some("https://en.wikipedia.org/wiki/B"));
        assert_eq!(cli.max_pages, Some(500));
        assert_eq!(cli.max_seconds, Some(60));
        assert!(cli.json);
    }
}
