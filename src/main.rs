// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (or prompt for the two URLs)
// 2. Open the visit log file
// 3. Run the breadth-first search between the two articles
// 4. Print every step with its sentence
// 5. Exit with proper code (0 = path found, 1 = no path, 2 = error)
//
// Diagnostics go to stderr through `tracing`; stdout only carries prompts
// and the path itself (with --json, the prompts move to stderr too).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod error;   // src/error.rs - error types
mod page;    // src/page/ - fetching pages, extracting links and sentences
mod search;  // src/search/ - the breadth-first path search

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use cli::Cli;
use page::{canonicalize_url, FetchConfig, HttpFetcher};
use search::{FileVisitLog, FoundPath, PathStep, SearchLimits};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = path found
//   Ok(1) = no path (frontier exhausted or limit reached)
//   Err = startup or unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (start_input, end_input) = read_urls(&cli)?;

    let start_url = canonicalize_url(&start_input)
        .with_context(|| format!("invalid start URL '{}'", start_input))?;
    let end_url = canonicalize_url(&end_input)
        .with_context(|| format!("invalid end URL '{}'", end_input))?;

    let origin = match &cli.origin {
        Some(origin) => Url::parse(origin).with_context(|| format!("invalid origin '{}'", origin))?,
        None => origin_of(&start_url)?,
    };

    // The log must be writable before any page is fetched
    let mut log = FileVisitLog::open(&cli.log_file)?;

    let mut config = FetchConfig::new(origin);
    config.article_prefix = cli.article_prefix.clone();
    config.timeout = Duration::from_secs(cli.timeout);
    let fetcher = HttpFetcher::new(config).context("failed to create HTTP client")?;

    let limits = SearchLimits {
        max_pages: cli.max_pages,
        max_duration: cli.max_seconds.map(Duration::from_secs),
    };

    tracing::info!(start = %start_url, end = %end_url, "searching");

    match search::find_path(&start_url, &end_url, &fetcher, &mut log, &limits).await {
        Ok(path) => {
            print_path(&path, cli.json)?;
            Ok(0)
        }
        Err(e) => {
            eprintln!("Error while searching for a path: {}", e);
            Ok(1)
        }
    }
}

// Logs to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "wiki_path=debug" } else { "wiki_path=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// Takes the URLs from the command line, prompting for any that are missing
fn read_urls(cli: &Cli) -> Result<(String, String)> {
    if let (Some(start), Some(end)) = (&cli.start_url, &cli.end_url) {
        return Ok((start.clone(), end.clone()));
    }

    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());

    // Keep stdout pure JSON when --json is set
    let mut out: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let start = match &cli.start_url {
        Some(start) => start.clone(),
        None => prompt(&mut tokens, &mut out, "Enter the start article URL:")?,
    };
    let end = match &cli.end_url {
        Some(end) => end.clone(),
        None => prompt(&mut tokens, &mut out, "Enter the target article URL:")?,
    };

    Ok((start, end))
}

fn prompt<R: BufRead, W: Write>(
    tokens: &mut TokenReader<R>,
    out: &mut W,
    message: &str,
) -> Result<String> {
    writeln!(out, "{}", message)?;
    out.flush()?;

    tokens
        .next_token()?
        .ok_or_else(|| anyhow!("no input given for: {}", message))
}

// Reads whitespace-separated words from a reader, across line breaks
struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    // Ok(None) means end of input
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

// "https://ru.wikipedia.org/wiki/Rust" -> "https://ru.wikipedia.org/"
fn origin_of(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).with_context(|| format!("invalid URL '{}'", url))?;
    if parsed.host_str().is_none() {
        return Err(anyhow!("URL has no host: {}", url));
    }
    parsed
        .join("/")
        .with_context(|| format!("cannot derive origin from '{}'", url))
}

// Prints the path either as numbered steps or JSON
fn print_path(path: &FoundPath, json: bool) -> Result<()> {
    print!("{}", render_path(path, json)?);
    Ok(())
}

fn render_path(path: &FoundPath, json: bool) -> Result<String> {
    if json {
        let json_output = serde_json::to_string_pretty(path)?;
        return Ok(format!("{}\n", json_output));
    }

    Ok(format_steps(&path.steps))
}

// One block per step:
//   1------------------------
//   <sentence, possibly empty>
//   <url>
fn format_steps(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("{}------------------------\n", i + 1));
        out.push_str(&step.context_sentence);
        out.push('\n');
        out.push_str(&step.url);
        out.push('\n');
    }
    out
}
