//! devdocs: project documentation digest.
//!
//! Walks a directory tree, collects Python docstrings and stylesheet/script
//! contents, and writes them into a single Markdown report.

pub mod config;
pub mod error;
pub mod indexer;
pub mod observability;
pub mod report;
pub mod types;

pub use config::{DocsConfig, ExclusionSet};
pub use error::{DocsError, Result};
pub use indexer::{Extraction, Extractor};
pub use report::{generate_documentation, write_documentation};
pub use types::FileRecord;
