//! Report generation: walk, extract, and write the Markdown document.

pub mod walker;
pub mod writer;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

pub use walker::{DocWalker, WalkSummary};
pub use writer::MarkdownWriter;

use crate::config::DocsConfig;
use crate::error::{DocsError, Result};
use crate::indexer::{Extraction, Extractor};
use crate::observability::RunStats;

/// Document every file under `root` into the report at `output`.
///
/// The root is checked before the report is created, so a missing root
/// leaves any existing report untouched. The report is truncated on open.
pub fn generate_documentation(root: &Path, output: &Path, config: &DocsConfig) -> Result<RunStats> {
    ensure_root(root)?;

    let file = File::create(output).map_err(|source| DocsError::Output {
        path: output.to_path_buf(),
        source,
    })?;
    let stats = write_documentation(root, config, BufWriter::new(file)).map_err(|e| match e {
        DocsError::Io(source) => DocsError::Output {
            path: output.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::info!(
        "Wrote {} ({} documented, {} ignored, {} failed, {} directories skipped) in {} ms",
        output.display(),
        stats.files_documented,
        stats.files_ignored,
        stats.files_failed,
        stats.dirs_pruned,
        stats.duration_ms.unwrap_or(0),
    );
    Ok(stats)
}

/// Write the report for `root` into `out`.
///
/// Per-file failures are logged and the file is reported with whatever was
/// collected; write failures abort the run.
pub fn write_documentation<W: Write>(root: &Path, config: &DocsConfig, out: W) -> Result<RunStats> {
    ensure_root(root)?;

    let started = Instant::now();
    let extractor = Extractor::new(&config.exclusions);
    let mut writer = MarkdownWriter::new(out);
    let mut stats = RunStats::new();

    let summary = DocWalker::new(root, &config.exclusions)
        .sorted(config.sort_entries)
        .walk(|path| {
            stats.files_visited += 1;
            let record = match extractor.extract(path) {
                Extraction::Ignored => {
                    tracing::debug!("Ignoring {}", path.display());
                    stats.files_ignored += 1;
                    return Ok(());
                }
                Extraction::Extracted(record) => record,
                Extraction::Failed { record, error } => {
                    tracing::error!("Error reading file {}: {}", path.display(), error);
                    stats.files_failed += 1;
                    record
                }
            };

            tracing::debug!("Documenting {} ({} entries)", path.display(), record.len());
            stats.entries_written += record.len();
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            writer.write_record(&file_name, &record)?;
            stats.files_documented += 1;
            Ok(())
        })?;

    writer.finish()?;

    stats.dirs_visited = summary.dirs_visited;
    stats.dirs_pruned = summary.dirs_pruned;
    stats.unreadable_entries = summary.unreadable;
    stats.duration_ms = Some(started.elapsed().as_millis() as u64);
    Ok(stats)
}

fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(DocsError::MissingRoot(root.to_path_buf()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
