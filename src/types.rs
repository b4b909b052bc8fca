//! Core domain types for devdocs.

use indexmap::IndexMap;

/// Placeholder recorded for declarations without a docstring.
pub const NO_DOCSTRING: &str = "No docstring found.";

/// Entry key used for files whose whole text is reported.
pub const CONTENT_KEY: &str = "content";

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// How a non-ignored file is documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Python source: declarations and their docstrings.
    Python,
    /// Stylesheet: raw text.
    Css,
    /// Script: raw text.
    JavaScript,
    /// Anything else: type tag only.
    Other,
}

impl FileKind {
    /// Pick the kind from the end of `file_name`.
    ///
    /// This is a plain suffix test, not an extension lookup: a file named
    /// `.py` has no extension but is still Python. Matching is
    /// case-sensitive, so `MAIN.PY` is [`FileKind::Other`].
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".py") {
            Self::Python
        } else if file_name.ends_with(".css") {
            Self::Css
        } else if file_name.ends_with(".js") {
            Self::JavaScript
        } else {
            Self::Other
        }
    }

    /// Whether the file's whole text ends up in the report.
    pub fn reports_content(&self) -> bool {
        matches!(self, Self::Css | Self::JavaScript)
    }
}

// ---------------------------------------------------------------------------
// Extension splitting
// ---------------------------------------------------------------------------

/// Return the extension of `file_name`, dot included.
///
/// The extension starts at the last dot of the name; leading dots belong to
/// the stem, so `.bashrc` has no extension while `archive.tar.gz` has `.gz`
/// and `notes.` has `.`.
pub fn split_extension(file_name: &str) -> &str {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => &file_name[stem_start + idx..],
        None => "",
    }
}

// ---------------------------------------------------------------------------
// FileRecord
// ---------------------------------------------------------------------------

/// Findings for one documented file.
///
/// Entries keep insertion order. Re-inserting a key replaces its value but
/// keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The file's extension, possibly empty.
    pub file_type: String,
    entries: IndexMap<String, String>,
}

impl FileRecord {
    pub fn new(file_type: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            entries: IndexMap::new(),
        }
    }

    /// Record `value` under `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in report order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the type tag is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("main.py", ".py" ; "simple")]
    #[test_case("archive.tar.gz", ".gz" ; "double_extension")]
    #[test_case(".bashrc", "" ; "dotfile")]
    #[test_case(".gitignore", "" ; "gitignore")]
    #[test_case("LICENSE", "" ; "no_extension")]
    #[test_case("notes.", "." ; "trailing_dot")]
    #[test_case("..hidden.cfg", ".cfg" ; "double_leading_dot")]
    #[test_case("...", "" ; "dots_only")]
    #[test_case("README.MD", ".MD" ; "case_preserved")]
    fn split_extension_cases(name: &str, expected: &str) {
        assert_eq!(split_extension(name), expected);
    }

    #[test_case("main.py", FileKind::Python ; "python")]
    #[test_case("style.css", FileKind::Css ; "css")]
    #[test_case("app.js", FileKind::JavaScript ; "javascript")]
    #[test_case(".py", FileKind::Python ; "bare_python_suffix")]
    #[test_case(".css", FileKind::Css ; "bare_css_suffix")]
    #[test_case(".js", FileKind::JavaScript ; "bare_js_suffix")]
    #[test_case("data.json", FileKind::Other ; "json")]
    #[test_case("MAIN.PY", FileKind::Other ; "case_sensitive")]
    #[test_case("py", FileKind::Other ; "no_dot")]
    #[test_case("Makefile", FileKind::Other ; "no_extension")]
    fn file_kind_from_file_name(name: &str, expected: FileKind) {
        assert_eq!(FileKind::from_file_name(name), expected);
    }

    #[test]
    fn reports_content_only_for_css_and_js() {
        assert!(FileKind::Css.reports_content());
        assert!(FileKind::JavaScript.reports_content());
        assert!(!FileKind::Python.reports_content());
        assert!(!FileKind::Other.reports_content());
    }

    #[test]
    fn record_overwrite_keeps_first_position() {
        let mut record = FileRecord::new(".py");
        record.insert("a", "first");
        record.insert("b", "second");
        record.insert("a", "third");

        let entries: Vec<_> = record.entries().collect();
        assert_eq!(entries, vec![("a", "third"), ("b", "second")]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn new_record_holds_only_type_tag() {
        let record = FileRecord::new(".json");
        assert_eq!(record.file_type, ".json");
        assert!(record.is_empty());
        assert_eq!(record.get(CONTENT_KEY), None);
    }
}
