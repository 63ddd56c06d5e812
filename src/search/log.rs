// src/search/log.rs
// =============================================================================
// The visit log: one line per visited page, plus fetch errors.
//
// The path finder does not know where this goes. It gets a `&mut dyn VisitLog`
// and calls it; the binary passes a FileVisitLog, tests pass MemoryVisitLog.
//
// Line format (append-only file, created on first use):
//   2026/10/16 14:03:11 INFO: Visiting: https://ru.wikipedia.org/wiki/...
//   2026/10/16 14:03:12 ERROR: https://...: HTTP 404 for https://...
//
// Rust concepts:
// - Trait objects: &mut dyn VisitLog
// - BufWriter + flush: one syscall per line is fine, but we still flush so
//   the file is current if the process is killed
// =============================================================================

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{FetchError, LogSinkError};

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Receives the search's visitation events.
pub trait VisitLog {
    /// A node was dequeued and is about to be examined.
    fn visited(&mut self, url: &str);

    /// A page could not be fetched; the node is dropped.
    fn fetch_failed(&mut self, url: &str, error: &FetchError);
}

/// Appends events to a file.
pub struct FileVisitLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileVisitLog {
    /// Opens (creating if needed) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogSinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogSinkError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    // Write failures are reported but never stop the search
    fn write_line(&mut self, level: &str, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let result = writeln!(self.writer, "{} {}: {}", timestamp, level, message)
            .and_then(|()| self.writer.flush());

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to write visit log");
        }
    }
}

impl VisitLog for FileVisitLog {
    fn visited(&mut self, url: &str) {
        self.write_line("INFO", &format!("Visiting: {}", url));
    }

    fn fetch_failed(&mut self, url: &str, error: &FetchError) {
        self.write_line("ERROR", &format!("{}: {}", url, error));
    }
}

/// Keeps events in memory (used by tests).
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryVisitLog {
    pub visited: Vec<String>,
    pub failed: Vec<String>,
}

#[cfg(test)]
impl VisitLog for MemoryVisitLog {
    fn visited(&mut self, url: &str) {
        self.visited.push(url.to_string());
    }

    fn fetch_failed(&mut self, url: &str, _error: &FetchError) {
        self.failed.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        {
            let mut log = FileVisitLog::open(&path).unwrap();
            log.visited("https://example.org/wiki/A");
        }
        {
            // Reopening must append, not truncate
            let mut log = FileVisitLog::open(&path).unwrap();
            log.visited("https://example.org/wiki/B");
            log.fetch_failed(
                "https://example.org/wiki/C",
                &FetchError::Status {
                    url: "https://example.org/wiki/C".to_string(),
                    status: 500,
                },
            );
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("INFO: Visiting: https://example.org/wiki/A"));
        assert!(lines[1].ends_with("INFO: Visiting: https://example.org/wiki/B"));
        assert!(lines[2].contains("ERROR: https://example.org/wiki/C: HTTP 500"));
        // "YYYY/MM/DD HH:MM:SS " prefix
        assert_eq!(lines[0].as_bytes()[4], b'/');
        assert_eq!(lines[0].as_bytes()[19], b' ');
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("log.txt");
        let err = FileVisitLog::open(&path).err().unwrap();
        assert!(matches!(err, LogSinkError::Open { .. }));
    }
}
