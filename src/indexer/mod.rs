//! Extraction pipeline: parse source files and collect their documentation.

pub mod docstring;
pub mod extractor;
pub mod parser;
pub mod syntax;

pub use extractor::{Extraction, Extractor};
pub use parser::CodeParser;
