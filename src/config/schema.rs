//! Configuration data structures for devdocs.
//!
//! Defines the YAML config format: exclusion lists, ordering, and the
//! report path. Every field is optional; missing fields take the built-in
//! defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Directory names that are never entered.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".",
    "venv",
    ".env_win",
    ".git",
    "__pycache__",
    "_data",
    "data",
    "data_lcl_pdf",
    "assets",
    "archives",
    "_markdown_modules_courses",
    "Bills GCP",
    "Google Cloud Skills Boost",
    "PPT",
    "Quiz",
    "Quiz prompts",
    "archives_py",
];

/// Extensions (or whole extensionless file names) that are never reported.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[
    ".gitattributes",
    ".gitignore",
    "LICENSE",
    ".md",
    ".txt",
    ".db",
    ".pdf",
];

/// Report file name used when nothing else is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "dev_documentations.md";

// ---------------------------------------------------------------------------
// ExclusionSet
// ---------------------------------------------------------------------------

/// Directory names to prune and file types to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Exact, case-sensitive directory names.
    pub excluded_dirs: BTreeSet<String>,
    /// Extensions or extensionless file names, stored lowercased.
    pub ignored_extensions: BTreeSet<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DIRS.iter().copied(),
            DEFAULT_IGNORED_EXTENSIONS.iter().copied(),
        )
    }
}

impl ExclusionSet {
    pub fn new<D, E>(dirs: D, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            excluded_dirs: dirs.into_iter().map(Into::into).collect(),
            ignored_extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// An exclusion set that prunes nothing but dot-directories.
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<String>(), std::iter::empty::<String>())
    }

    pub fn exclude_dir(&mut self, name: impl Into<String>) {
        self.excluded_dirs.insert(name.into());
    }

    pub fn ignore_extension(&mut self, ext: &str) {
        self.ignored_extensions.insert(ext.to_lowercase());
    }

    /// Whether the traversal must not descend into a directory called `name`.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.contains(name)
    }

    /// Whether a file with this name and extension is left out of the report.
    ///
    /// The extension is compared case-insensitively; the whole file name is
    /// compared too so entries such as `LICENSE` or `.gitignore` match files
    /// that have no extension.
    pub fn is_ignored_file(&self, file_name: &str, extension: &str) -> bool {
        if !extension.is_empty() && self.ignored_extensions.contains(&extension.to_lowercase()) {
            return true;
        }
        extension.is_empty() && self.ignored_extensions.contains(&file_name.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// DocsConfig
// ---------------------------------------------------------------------------

/// Resolved configuration for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub exclusions: ExclusionSet,
    /// Sort directory listings by name for reproducible reports.
    pub sort_entries: bool,
    /// Report path, relative to the working directory unless absolute.
    pub output: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            sort_entries: false,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl DocsConfig {
    /// Apply a parsed config file on top of `self`.
    pub fn merge_file(&mut self, file: ConfigFile) {
        if !file.extend_defaults {
            if !file.excluded_dirs.is_empty() {
                self.exclusions.excluded_dirs.clear();
            }
            if !file.ignored_extensions.is_empty() {
                self.exclusions.ignored_extensions.clear();
            }
        }
        for dir in file.excluded_dirs {
            self.exclusions.exclude_dir(dir);
        }
        for ext in &file.ignored_extensions {
            self.exclusions.ignore_extension(ext);
        }
        if let Some(sort) = file.sort_entries {
            self.sort_entries = sort;
        }
        if let Some(output) = file.output {
            self.output = output;
        }
    }

    /// Resolve the report path against `cwd` when it is relative.
    pub fn output_path(&self, cwd: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            cwd.join(&self.output)
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigFile
// ---------------------------------------------------------------------------

/// On-disk shape of `.devdocs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub excluded_dirs: Vec<String>,

    #[serde(default)]
    pub ignored_extensions: Vec<String>,

    #[serde(default)]
    pub sort_entries: Option<bool>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Add the listed names to the built-in sets instead of replacing them.
    #[serde(default = "default_true")]
    pub extend_defaults: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            ignored_extensions: Vec::new(),
            sort_entries: None,
            output: None,
            extend_defaults: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
