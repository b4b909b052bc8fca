//! Configuration loading.
//!
//! Sources, lowest priority first: built-in defaults, a YAML config file
//! (explicit path or `.devdocs.yaml` in the documented root), CLI flags.

pub mod schema;

use std::path::{Path, PathBuf};

pub use schema::{ConfigFile, DocsConfig, ExclusionSet};

use crate::error::{DocsError, Result};

/// Name of the config file looked up in the documented root.
pub const CONFIG_FILE_NAME: &str = ".devdocs.yaml";

/// Read and parse a YAML config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| DocsError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| DocsError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Locate `.devdocs.yaml` directly inside `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    let candidate = root.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Build the effective config for documenting `root`.
///
/// An explicit `config_path` must exist; otherwise a discovered file is used
/// when present.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<DocsConfig> {
    let mut config = DocsConfig::default();
    let source = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover(root),
    };
    if let Some(path) = source {
        tracing::debug!("Loading config from {}", path.display());
        config.merge_file(load_config_file(&path)?);
    }
    Ok(config)
}
