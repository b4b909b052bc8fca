//! Native tree-sitter parser wrapper for Python sources.
//!
//! The grammar is statically linked; there is no runtime setup. A fresh
//! `tree_sitter::Parser` is created on every call because the C object is
//! `!Send`.

use tree_sitter::{Node, Tree};

use super::syntax;
use crate::error::{DocsError, Result};
use crate::types::FileKind;

/// Thin wrapper around tree-sitter parsing for documented source files.
pub struct CodeParser;

impl CodeParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse Python `content` into a concrete syntax tree.
    ///
    /// tree-sitter recovers from syntax errors, so the returned tree may
    /// contain `ERROR` or `MISSING` nodes. Use [`CodeParser::parse_strict`]
    /// to reject those.
    pub fn parse(&self, content: &str) -> Result<Tree> {
        let ts_lang: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&ts_lang)
            .map_err(|e| DocsError::Parse(format!("Language version mismatch: {e}")))?;

        parser.parse(content, None).ok_or_else(|| {
            DocsError::Parse("tree-sitter returned None (timeout or cancellation)".into())
        })
    }

    /// Parse `content` and fail on the first syntax error.
    ///
    /// Besides tree-sitter's `ERROR`/`MISSING` nodes this rejects what the
    /// grammar tolerates but Python 3 does not: inconsistent indentation
    /// and Python 2 constructs. `file_name` only appears in the error message.
    pub fn parse_strict(&self, content: &str, file_name: &str) -> Result<Tree> {
        let syntax_error =
            |what: &str, line: usize| DocsError::Parse(format!("{what} ({file_name}, line {line})"));

        if let Err(issue) = syntax::check_indentation(content) {
            return Err(syntax_error(issue.message, issue.line));
        }

        let tree = self.parse(content)?;
        if let Some(bad) = first_error(tree.root_node()) {
            let what = if bad.is_missing() {
                format!("expected '{}'", bad.kind())
            } else {
                "invalid syntax".to_string()
            };
            return Err(syntax_error(&what, bad.start_position().row + 1));
        }
        if let Some(issue) = syntax::find_legacy_construct(tree.root_node(), content) {
            return Err(syntax_error(issue.message, issue.line));
        }
        Ok(tree)
    }

    /// Whether files of this kind are parsed for declarations.
    #[must_use]
    pub fn is_supported(kind: FileKind) -> bool {
        kind == FileKind::Python
    }
}

impl Default for CodeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionSet;
    use crate::indexer::Extraction;
    use crate::indexer::Extractor;
    use test_case::test_case;

    #[test]
    fn parse_python_returns_valid_tree() {
        let parser = CodeParser::new();
        let source = r#"
import os
from pathlib import Path

def greet(name: str) -> str:
    return f"Hello, {name}!"

class UserService:
    def __init__(self, db):
        self.db = db

    def get_user(self, user_id: int):
        return self.db.find(user_id)
"#;

        let tree = parser.parse(source).expect("should parse Python");
        let root = tree.root_node();
        assert_eq!(root.kind(), "module");
        assert!(root.child_count() > 0, "tree should have children");
        assert!(!root.has_error(), "tree should be error-free");
    }

    #[test]
    fn parse_empty_source_returns_tree() {
        let parser = CodeParser::new();
        let tree = parser.parse("").expect("empty source should parse");
        let root = tree.root_node();
        assert_eq!(root.kind(), "module");
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn lenient_parse_accepts_broken_source() {
        let parser = CodeParser::new();
        let tree = parser.parse("def broken(:\n    pass\n").unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn strict_parse_rejects_broken_source() {
        let parser = CodeParser::new();
        let err = parser
            .parse_strict("x = 1\ndef broken(:\n    pass\n", "broken.py")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken.py"), "message was: {msg}");
        assert!(msg.contains("line"), "message was: {msg}");
    }

    #[test]
    fn strict_parse_accepts_valid_source() {
        let parser = CodeParser::new();
        assert!(parser.parse_strict("def ok():\n    pass\n", "ok.py").is_ok());
    }

    #[test]
    fn only_python_is_parsed() {
        assert!(CodeParser::is_supported(FileKind::Python));
        assert!(!CodeParser::is_supported(FileKind::JavaScript));
        assert!(!CodeParser::is_supported(FileKind::Css));
        assert!(!CodeParser::is_supported(FileKind::Other));
    }

    #[test]
    fn code_parser_default_works() {
        let parser = CodeParser::default();
        assert!(parser.parse("pass\n").is_ok());
    }

    // Sources tree-sitter accepts without ERROR nodes but Python 3 refuses.
    const PYTHON3_REJECTS: &[&str] = &[
        "print \"x\"\n",
        "exec \"code\"\n",
        "try:\n    pass\nexcept E, e:\n    pass\n",
        "x = 10L\n",
        "x = 0777\n",
        "if 1 <> 2:\n    pass\n",
        "y = `x`\n",
        "def f():\n        x = 1\n    y = 2\n",
        "def f():\n    x = 1\n\ty = 2\n",
        "class A:\n\tdef f(self):\n\t\tpass\n        def g(self):\n\t\tpass\n",
    ];

    #[test_case(0, "Missing parentheses in call to 'print'" ; "print_statement")]
    #[test_case(1, "Missing parentheses in call to 'exec'" ; "exec_statement")]
    #[test_case(2, "multiple exception types must be parenthesized" ; "comma_except")]
    #[test_case(3, "invalid decimal literal" ; "long_suffix")]
    #[test_case(4, "leading zeros" ; "old_octal")]
    #[test_case(5, "invalid syntax" ; "diamond_operator")]
    #[test_case(6, "invalid syntax" ; "backticks")]
    #[test_case(7, "unindent does not match any outer indentation level" ; "bad_dedent")]
    #[test_case(8, "inconsistent use of tabs and spaces" ; "tab_after_spaces")]
    #[test_case(9, "inconsistent use of tabs and spaces" ; "spaces_after_tabs")]
    fn strict_parse_rejects_python2_only_source(case: usize, expected: &str) {
        let err = CodeParser::new()
            .parse_strict(PYTHON3_REJECTS[case], "legacy.py")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(expected), "message was: {msg}");
        assert!(msg.contains("legacy.py"), "message was: {msg}");
    }

    #[test]
    fn python2_only_files_fail_extraction() {
        let dir = tempfile::TempDir::new().unwrap();
        let exclusions = ExclusionSet::default();
        let extractor = Extractor::new(&exclusions);

        for (i, source) in PYTHON3_REJECTS.iter().enumerate() {
            let path = dir.path().join(format!("legacy_{i}.py"));
            std::fs::write(&path, format!("def documented():\n    \"kept\"\n{source}")).unwrap();
            match extractor.extract(&path) {
                Extraction::Failed { record, .. } => assert!(record.is_empty(), "case {i}"),
                other => panic!("case {i} should fail, got {other:?}"),
            }
        }
    }

    #[test_case("print(\"x\")\n" ; "print_call")]
    #[test_case("exec(\"code\")\n" ; "exec_call")]
    #[test_case("try:\n    pass\nexcept (E, F) as e:\n    pass\n" ; "parenthesized_except")]
    #[test_case("x = 0o777 + 0 + 00 + 1_000\n" ; "modern_integers")]
    #[test_case("if 1 != 2:\n    pass\n" ; "not_equal")]
    #[test_case("def f():\n\tif x:\n\t\treturn 1\n\treturn 2\n" ; "tabs_only")]
    fn strict_parse_accepts_python3_source(source: &str) {
        assert!(CodeParser::new().parse_strict(source, "modern.py").is_ok());
    }
}
