//! Per-file extraction: turn one file into a [`FileRecord`].
//!
//! Python sources contribute one entry per `def`/`class` (any depth),
//! stylesheets and scripts contribute their raw text, and every other
//! non-ignored file contributes its type tag only.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tree_sitter::Node;

use crate::config::ExclusionSet;
use crate::error::{DocsError, Result};
use crate::indexer::docstring::docstring_of;
use crate::indexer::parser::CodeParser;
use crate::types::{split_extension, FileKind, FileRecord, CONTENT_KEY, NO_DOCSTRING};

/// Node kinds that count as declarations.
const DECLARATION_KINDS: &[&str] = &["function_definition", "class_definition"];

/// Outcome of extracting one file.
#[derive(Debug)]
pub enum Extraction {
    /// The file type is ignored; nothing is reported.
    Ignored,
    /// Everything the file offers was collected.
    Extracted(FileRecord),
    /// Opening, decoding, or parsing failed. `record` holds what was
    /// collected before the failure.
    Failed { record: FileRecord, error: DocsError },
}

impl Extraction {
    /// The record to report, if any. Failures still report their partial
    /// record.
    pub fn into_record(self) -> Option<FileRecord> {
        match self {
            Self::Ignored => None,
            Self::Extracted(record) | Self::Failed { record, .. } => Some(record),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Extracts documentation facts from files.
pub struct Extractor<'a> {
    exclusions: &'a ExclusionSet,
    parser: CodeParser,
}

impl<'a> Extractor<'a> {
    pub fn new(exclusions: &'a ExclusionSet) -> Self {
        Self {
            exclusions,
            parser: CodeParser::new(),
        }
    }

    /// Extract the documentation record for the file at `path`.
    pub fn extract(&self, path: &Path) -> Extraction {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = split_extension(&file_name);

        if self.exclusions.is_ignored_file(&file_name, extension) {
            return Extraction::Ignored;
        }

        let mut record = FileRecord::new(extension);
        match self.fill_record(path, &file_name, FileKind::from_file_name(&file_name), &mut record) {
            Ok(()) => Extraction::Extracted(record),
            Err(error) => Extraction::Failed { record, error },
        }
    }

    fn fill_record(
        &self,
        path: &Path,
        file_name: &str,
        kind: FileKind,
        record: &mut FileRecord,
    ) -> Result<()> {
        // Every reported file must at least be readable.
        let mut file = File::open(path)?;

        if CodeParser::is_supported(kind) {
            let source = normalize_newlines(&read_utf8(&mut file, path)?);
            let tree = self.parser.parse_strict(&source, file_name)?;
            collect_declarations(tree.root_node(), &source, record);
        } else if kind.reports_content() {
            let content = read_utf8(&mut file, path)?;
            record.insert(CONTENT_KEY, content);
        }
        Ok(())
    }
}

fn read_utf8(file: &mut File, path: &Path) -> Result<String> {
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|source| DocsError::Decode {
        path: path.display().to_string(),
        source,
    })
}

/// Translate `\r\n` and lone `\r` line endings to `\n`.
fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Concrete-syntax wrappers with no node of their own in Python's `ast`.
/// Their children belong to the enclosing statement.
const TRANSPARENT_KINDS: &[&str] = &[
    "block",
    "decorated_definition",
    "else_clause",
    "finally_clause",
];

/// A pending node of the breadth-first walk.
enum Visit<'t> {
    Node(Node<'t>),
    /// An `elif` branch together with the branches after it. In the `ast`
    /// it is an `if` nested in the previous branch's `orelse`, one level
    /// deeper than the clause before it.
    Elif(Node<'t>, Vec<Node<'t>>),
}

/// Record every declaration under `root`, breadth-first at `ast` depth.
///
/// Later declarations with an already-recorded name replace the earlier
/// value, so the visiting order decides which docstring wins.
fn collect_declarations(root: Node<'_>, source: &str, record: &mut FileRecord) {
    let mut queue = VecDeque::from([Visit::Node(root)]);
    while let Some(visit) = queue.pop_front() {
        match visit {
            Visit::Node(node) => {
                if DECLARATION_KINDS.contains(&node.kind()) {
                    if let Some(name) = node.child_by_field_name("name") {
                        let doc = docstring_of(&node, source)
                            .unwrap_or_else(|| NO_DOCSTRING.to_string());
                        record.insert(&source[name.byte_range()], doc);
                    }
                }
                push_children(node, &mut queue);
            }
            Visit::Elif(clause, rest) => {
                push_children(clause, &mut queue);
                push_branches(rest, &mut queue);
            }
        }
    }
}

fn push_children<'t>(node: Node<'t>, queue: &mut VecDeque<Visit<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    if node.kind() == "if_statement" {
        let (branches, body): (Vec<_>, Vec<_>) = children
            .into_iter()
            .partition(|child| matches!(child.kind(), "elif_clause" | "else_clause"));
        push_flattened(body, queue);
        push_branches(branches, queue);
    } else {
        push_flattened(children, queue);
    }
}

fn push_flattened<'t>(nodes: Vec<Node<'t>>, queue: &mut VecDeque<Visit<'t>>) {
    for node in nodes {
        if TRANSPARENT_KINDS.contains(&node.kind()) {
            push_children(node, queue);
        } else {
            queue.push_back(Visit::Node(node));
        }
    }
}

fn push_branches<'t>(mut branches: Vec<Node<'t>>, queue: &mut VecDeque<Visit<'t>>) {
    if branches.is_empty() {
        return;
    }
    let first = branches.remove(0);
    if first.kind() == "elif_clause" {
        queue.push_back(Visit::Elif(first, branches));
    } else {
        push_children(first, queue);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
