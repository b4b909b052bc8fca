//! Top-down directory traversal with exclusion pruning.
//!
//! Within a directory, files are visited before any subdirectory is
//! entered. Excluded subdirectories are pruned before descent, so nothing
//! beneath them is ever read.

use std::cell::Cell;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::ExclusionSet;
use crate::error::{DocsError, Result};

/// Counters gathered while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directories entered, root included.
    pub dirs_visited: usize,
    /// Subdirectories skipped by the exclusion rules.
    pub dirs_pruned: usize,
    /// Entries that could not be read and were skipped.
    pub unreadable: usize,
}

/// Walker over the files of a documented tree.
#[derive(Debug)]
pub struct DocWalker<'a> {
    root: PathBuf,
    exclusions: &'a ExclusionSet,
    sorted: bool,
}

impl<'a> DocWalker<'a> {
    pub fn new(root: &Path, exclusions: &'a ExclusionSet) -> Self {
        Self {
            root: root.to_path_buf(),
            exclusions,
            sorted: false,
        }
    }

    /// Sort each directory listing by name instead of keeping the
    /// filesystem's order.
    #[must_use]
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Call `on_file` for every reportable file, in traversal order.
    ///
    /// An unreadable root is an error; unreadable entries below it are
    /// logged and skipped. Errors returned by `on_file` stop the walk.
    pub fn walk<F>(&self, mut on_file: F) -> Result<WalkSummary>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let sorted = self.sorted;
        let pruned = Cell::new(0usize);
        let mut summary = WalkSummary::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(move |a, b| listing_order(a, b, sorted))
            .into_iter()
            .filter_entry(|entry| {
                let keep = !self.is_pruned(entry);
                if !keep {
                    tracing::debug!("Skipping excluded directory {}", entry.path().display());
                    pruned.set(pruned.get() + 1);
                }
                keep
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(DocsError::Walk {
                        path: self.root.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    summary.unreadable += 1;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                summary.dirs_visited += 1;
                continue;
            }
            if file_type.is_symlink() {
                // Directory links are listed but never followed.
                if entry.path().is_dir() {
                    continue;
                }
            } else if !file_type.is_file() {
                tracing::debug!("Skipping special file {}", entry.path().display());
                continue;
            }

            on_file(entry.path())?;
        }

        summary.dirs_pruned = pruned.get();
        Ok(summary)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        // The root is always walked, whatever its name.
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        self.exclusions
            .is_excluded_dir(&entry.file_name().to_string_lossy())
    }
}

/// Files before directories; optionally by name within each group.
fn listing_order(a: &DirEntry, b: &DirEntry, by_name: bool) -> Ordering {
    let group = a.file_type().is_dir().cmp(&b.file_type().is_dir());
    if by_name {
        group.then_with(|| a.file_name().cmp(b.file_name()))
    } else {
        group
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for path in files {
            let full = dir.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, "x").unwrap();
        }
        dir
    }

    fn walk_names(dir: &TempDir, exclusions: &ExclusionSet) -> (Vec<String>, WalkSummary) {
        let mut seen = Vec::new();
        let summary = DocWalker::new(dir.path(), exclusions)
            .sorted(true)
            .walk(|path| {
                let rel = path.strip_prefix(dir.path()).unwrap();
                seen.push(rel.to_string_lossy().replace('\\', "/"));
                Ok(())
            })
            .unwrap();
        (seen, summary)
    }

    #[test]
    fn files_come_before_subdirectories() {
        let dir = tree(&["z.py", "a/inner.py", "b.py", "a/deep/x.py", "c/y.py"]);
        let (seen, summary) = walk_names(&dir, &ExclusionSet::default());
        assert_eq!(seen, vec!["b.py", "z.py", "a/inner.py", "a/deep/x.py", "c/y.py"]);
        assert_eq!(summary.dirs_visited, 4);
        assert_eq!(summary.dirs_pruned, 0);
    }

    #[test]
    fn excluded_and_dot_directories_are_pruned() {
        let dir = tree(&[
            "keep.py",
            "venv/lib/site.py",
            ".git/config.py",
            ".cache/deep/x.py",
            "data/d.py",
            "Quiz prompts/q.py",
            "src/data/nested.py",
            "src/ok.py",
        ]);
        let (seen, summary) = walk_names(&dir, &ExclusionSet::default());
        assert_eq!(seen, vec!["keep.py", "src/ok.py"]);
        assert_eq!(summary.dirs_pruned, 6);
    }

    #[test]
    fn dot_files_are_not_pruned() {
        let dir = tree(&[".env.py", "visible.py"]);
        let (seen, _) = walk_names(&dir, &ExclusionSet::default());
        assert_eq!(seen, vec![".env.py", "visible.py"]);
    }

    #[test]
    fn root_with_excluded_name_is_still_walked() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("data");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.py"), "x").unwrap();

        let exclusions = ExclusionSet::default();
        let mut count = 0;
        DocWalker::new(&root, &exclusions)
            .walk(|_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let parent = TempDir::new().unwrap();
        let exclusions = ExclusionSet::default();
        let result = DocWalker::new(&parent.path().join("absent"), &exclusions).walk(|_| Ok(()));
        assert!(matches!(result, Err(DocsError::Walk { .. })));
    }

    #[test]
    fn callback_error_stops_the_walk() {
        let dir = tree(&["a.py", "b.py"]);
        let exclusions = ExclusionSet::default();
        let mut calls = 0;
        let result = DocWalker::new(dir.path(), &exclusions).sorted(true).walk(|_| {
            calls += 1;
            Err(DocsError::Parse("stop".into()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_followed() {
        let dir = tree(&["real/a.py", "top.py"]);
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("top.py"), dir.path().join("alias.py")).unwrap();

        let (seen, _) = walk_names(&dir, &ExclusionSet::default());
        assert_eq!(seen, vec!["alias.py", "top.py", "real/a.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped_and_counted() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tree(&["a.py", "locked/hidden.py", "open/b.py"]);
        let locked = dir.path().join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory.
        if std::fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (seen, summary) = walk_names(&dir, &ExclusionSet::default());
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(seen, vec!["a.py", "open/b.py"]);
        assert_eq!(summary.unreadable, 1);
    }
}
