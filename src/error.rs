//! Error types for devdocs.
//!
//! Per-file failures (open, decode, parse) are recovered by the report
//! generator; everything else propagates to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The directory to document does not exist or is not a directory.
    #[error("root directory does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    /// Source text could not be turned into a syntax tree.
    #[error("{0}")]
    Parse(String),

    /// File contents are not valid UTF-8.
    #[error("'utf-8' codec can't decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Configuration file missing or malformed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// The Markdown report could not be created or written.
    #[error("cannot write report {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocsError>;
