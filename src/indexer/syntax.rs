//! Python 3 validity checks that tree-sitter does not enforce.
//!
//! The grammar is permissive: it accepts Python 2 statements and literals,
//! and its indentation scanner forgives dedents to unknown levels and mixed
//! tabs and spaces. These checks reject what the CPython tokenizer and
//! parser reject.

use tree_sitter::Node;

/// A syntax problem with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub message: &'static str,
    pub line: usize,
}

impl SyntaxIssue {
    fn new(message: &'static str, line: usize) -> Self {
        Self { message, line }
    }
}

const TAB_ERROR: &str = "inconsistent use of tabs and spaces in indentation";
const DEDENT_ERROR: &str = "unindent does not match any outer indentation level";

// ---------------------------------------------------------------------------
// Indentation
// ---------------------------------------------------------------------------

/// Check indentation the way the CPython tokenizer does.
///
/// Every logical line's indentation is measured twice, with tabs to the
/// next multiple of 8 and with tabs as one column. Both measures must order
/// the line the same way against the enclosing indentation levels, and a
/// dedent must land on a level that was opened before. Lines inside
/// brackets, strings, or after a backslash continuation are not logical
/// line starts. Blank and comment-only lines are skipped.
pub fn check_indentation(source: &str) -> Result<(), SyntaxIssue> {
    let chars: Vec<char> = source.chars().collect();
    let mut levels: Vec<(usize, usize)> = vec![(0, 0)];
    let mut scan = LineScanner::default();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        if scan.at_logical_start() {
            let (col, alt, start) = measure_indent(&chars, i);
            i = start;
            let blank = matches!(chars.get(i), None | Some('#') | Some('\n'));
            if !blank {
                check_level(&mut levels, col, alt, line)?;
            }
        }
        scan.continued = false;
        i = scan.consume_line(&chars, i);
        line += 1;
    }
    Ok(())
}

fn measure_indent(chars: &[char], mut i: usize) -> (usize, usize, usize) {
    let (mut col, mut alt) = (0, 0);
    while let Some(&c) = chars.get(i) {
        match c {
            ' ' => {
                col += 1;
                alt += 1;
            }
            '\t' => {
                col = (col / 8 + 1) * 8;
                alt += 1;
            }
            '\u{0C}' => {
                col = 0;
                alt = 0;
            }
            _ => break,
        }
        i += 1;
    }
    (col, alt, i)
}

fn check_level(
    levels: &mut Vec<(usize, usize)>,
    col: usize,
    alt: usize,
    line: usize,
) -> Result<(), SyntaxIssue> {
    let &(top_col, top_alt) = levels.last().unwrap_or(&(0, 0));
    if col == top_col {
        if alt != top_alt {
            return Err(SyntaxIssue::new(TAB_ERROR, line));
        }
    } else if col > top_col {
        if alt <= top_alt {
            return Err(SyntaxIssue::new(TAB_ERROR, line));
        }
        levels.push((col, alt));
    } else {
        while levels.len() > 1 && levels.last().is_some_and(|&(c, _)| col < c) {
            levels.pop();
        }
        let &(top_col, top_alt) = levels.last().unwrap_or(&(0, 0));
        if col != top_col {
            return Err(SyntaxIssue::new(DEDENT_ERROR, line));
        }
        if alt != top_alt {
            return Err(SyntaxIssue::new(TAB_ERROR, line));
        }
    }
    Ok(())
}

/// Lexical state carried from one physical line to the next.
#[derive(Debug, Default)]
struct LineScanner {
    depth: usize,
    /// Open string: quote character and whether it is triple-quoted.
    string: Option<(char, bool)>,
    continued: bool,
}

impl LineScanner {
    fn at_logical_start(&self) -> bool {
        self.depth == 0 && self.string.is_none() && !self.continued
    }

    /// Scan from `i` through the end of the physical line and return the
    /// index of the next line's first character.
    fn consume_line(&mut self, chars: &[char], mut i: usize) -> usize {
        while let Some(&c) = chars.get(i) {
            if let Some((quote, triple)) = self.string {
                match c {
                    '\\' if chars.get(i + 1) == Some(&'\n') => return i + 2,
                    '\\' => i += 1,
                    '\n' if !triple => {
                        // Unterminated; the parser reports it.
                        self.string = None;
                        return i + 1;
                    }
                    '\n' => return i + 1,
                    _ if c == quote => {
                        if !triple {
                            self.string = None;
                        } else if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                            self.string = None;
                            i += 2;
                        }
                    }
                    _ => {}
                }
                i += 1;
                continue;
            }

            match c {
                '\n' => return i + 1,
                '#' => {
                    while chars.get(i).is_some_and(|&c| c != '\n') {
                        i += 1;
                    }
                    continue;
                }
                '"' | '\'' => {
                    let triple = chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c);
                    self.string = Some((c, triple));
                    if triple {
                        i += 2;
                    }
                }
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
                '\\' if chars.get(i + 1) == Some(&'\n') => {
                    self.continued = true;
                    return i + 2;
                }
                _ => {}
            }
            i += 1;
        }
        i
    }
}

// ---------------------------------------------------------------------------
// Python 2 constructs
// ---------------------------------------------------------------------------

/// Find the first construct that only Python 2 accepts, in document order.
pub fn find_legacy_construct(root: Node<'_>, source: &str) -> Option<SyntaxIssue> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if let Some(message) = legacy_message(&node, source) {
            return Some(SyntaxIssue::new(message, node.start_position().row + 1));
        }
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return None;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

fn legacy_message(node: &Node<'_>, source: &str) -> Option<&'static str> {
    match node.kind() {
        "print_statement" => Some("Missing parentheses in call to 'print'"),
        "exec_statement" => Some("Missing parentheses in call to 'exec'"),
        "<>" => Some("invalid syntax"),
        "integer" => legacy_integer(&source[node.byte_range()]),
        "except_clause" if has_comma_alias(node) => {
            Some("multiple exception types must be parenthesized")
        }
        _ => None,
    }
}

fn legacy_integer(text: &str) -> Option<&'static str> {
    let digits = text.replace('_', "");
    if digits.ends_with(['l', 'L']) {
        return Some("invalid decimal literal");
    }
    let mut chars = digits.chars();
    let leading_zero = chars.next() == Some('0')
        && chars.clone().next().is_some_and(|c| c.is_ascii_digit());
    if leading_zero && !digits.chars().all(|c| c == '0') {
        return Some("leading zeros in decimal integer literals are not permitted");
    }
    None
}

/// `except E, e:` parses with a bare `,` token directly under the clause.
fn has_comma_alias(node: &Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == ",");
    found
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
