//! Structured logging and run statistics.
//!
//! - [`init_logging`]: one-time logging setup with `RUST_LOG` support
//! - [`RunStats`]: counters for one report run, serializable to JSON

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `devdocs=info` when `RUST_LOG` is not set, or `devdocs=debug`
/// when `verbose` is set. Logs go to stderr so stdout stays free for
/// machine-readable output. Subsequent calls are ignored.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "devdocs=debug" } else { "devdocs=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Counters collected while generating one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub duration_ms: Option<u64>,
    /// Files handed to the extractor.
    pub files_visited: usize,
    /// Files that got a block in the report, failures included.
    pub files_documented: usize,
    /// Files skipped because of their extension or name.
    pub files_ignored: usize,
    /// Files whose extraction failed.
    pub files_failed: usize,
    /// Body lines written across all blocks.
    pub entries_written: usize,
    pub dirs_visited: usize,
    pub dirs_pruned: usize,
    pub unreadable_entries: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            duration_ms: None,
            files_visited: 0,
            files_documented: 0,
            files_ignored: 0,
            files_failed: 0,
            entries_written: 0,
            dirs_visited: 0,
            dirs_pruned: 0,
            unreadable_entries: 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "duration_ms": self.duration_ms,
            "files_visited": self.files_visited,
            "files_documented": self.files_documented,
            "files_ignored": self.files_ignored,
            "files_failed": self.files_failed,
            "entries_written": self.entries_written,
            "dirs_visited": self.dirs_visited,
            "dirs_pruned": self.dirs_pruned,
            "unreadable_entries": self.unreadable_entries,
        })
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_does_not_panic() {
        init_logging(false);
        // Second call should also not panic (try_init ignores re-init).
        init_logging(true);
    }

    #[test]
    fn stats_new_has_zero_values() {
        let s = RunStats::new();
        assert_eq!(s.files_visited, 0);
        assert_eq!(s.files_documented, 0);
        assert_eq!(s.files_failed, 0);
        assert!(s.duration_ms.is_none());
        assert_eq!(s, RunStats::default());
    }

    #[test]
    fn stats_to_json_contains_all_fields() {
        let mut s = RunStats::new();
        s.files_visited = 12;
        s.files_documented = 9;
        s.files_ignored = 3;
        s.files_failed = 1;
        s.entries_written = 40;
        s.dirs_pruned = 2;
        s.duration_ms = Some(15);

        let json = s.to_json();
        assert_eq!(json["files_visited"], 12);
        assert_eq!(json["files_documented"], 9);
        assert_eq!(json["files_ignored"], 3);
        assert_eq!(json["files_failed"], 1);
        assert_eq!(json["entries_written"], 40);
        assert_eq!(json["dirs_pruned"], 2);
        assert_eq!(json["duration_ms"], 15);
    }

    #[test]
    fn stats_to_json_null_duration() {
        assert!(RunStats::new().to_json()["duration_ms"].is_null());
    }
}
