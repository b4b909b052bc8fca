//! Docstring lookup for Python declarations.
//!
//! A docstring is the first statement of a `def`/`class` body when that
//! statement is a plain string literal. Byte strings and f-strings never
//! count. Adjacent literals are joined, escapes are decoded for non-raw
//! literals, and the result is dedented like `inspect.cleandoc`.

use tree_sitter::Node;

/// Return the cleaned docstring of a `function_definition` or
/// `class_definition` node, or `None` when the body does not start with one.
///
/// An empty docstring is reported as `None`.
pub fn docstring_of(node: &Node<'_>, source: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first = first_statement(&body)?;

    let expression = match first.kind() {
        "expression_statement" => {
            // `"doc", 1` is a tuple, not a docstring.
            if first.named_child_count() != 1 {
                return None;
            }
            first.named_child(0)?
        }
        _ => first,
    };
    let literal = unparenthesize(expression);
    if !matches!(literal.kind(), "string" | "concatenated_string") {
        return None;
    }

    let value = literal_value(&literal, source)?;
    let cleaned = clean_indentation(&value);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.trim().to_string())
    }
}

fn first_statement<'t>(body: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// `("doc")` is the same expression as `"doc"`.
fn unparenthesize(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();
        match inner.as_slice() {
            [only] => node = *only,
            _ => break,
        }
    }
    node
}

/// Evaluate a string literal node (or implicit concatenation of several).
fn literal_value(node: &Node<'_>, source: &str) -> Option<String> {
    if node.kind() == "concatenated_string" {
        let mut joined = String::new();
        let mut cursor = node.walk();
        for part in node.named_children(&mut cursor) {
            if part.kind() != "string" {
                continue;
            }
            joined.push_str(&string_value(&source[part.byte_range()])?);
        }
        return Some(joined);
    }
    string_value(&source[node.byte_range()])
}

/// Evaluate the text of a single Python string literal.
///
/// Returns `None` for byte strings, f-strings, and template strings.
pub fn string_value(literal: &str) -> Option<String> {
    let prefix_len = literal
        .find(|c: char| c == '"' || c == '\'')
        .unwrap_or(literal.len());
    let prefix = literal[..prefix_len].to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }
    let raw = prefix.contains('r');

    let quoted = &literal[prefix_len..];
    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < quote_len * 2 {
        return None;
    }
    let body = &quoted[quote_len..quoted.len() - quote_len];

    Some(if raw {
        body.to_string()
    } else {
        decode_escapes(body)
    })
}

/// Decode backslash escapes the way a non-raw Python `str` literal does.
fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                let decoded = (digits.len() == width)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            other => {
                // Unknown escapes (and `\N{...}`) stay verbatim.
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// Dedent docstring text like `inspect.cleandoc`.
///
/// Tabs are expanded, the first line loses its leading whitespace, the
/// common indentation of the remaining lines is removed, and blank lines at
/// either end are dropped.
pub fn clean_indentation(doc: &str) -> String {
    let expanded: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.chars().count() - line.trim_start().chars().count())
        .min();

    let mut lines: Vec<String> = Vec::with_capacity(expanded.len());
    for (i, line) in expanded.into_iter().enumerate() {
        if i == 0 {
            lines.push(line.trim_start().to_string());
        } else if let Some(margin) = margin {
            lines.push(line.chars().skip(margin).collect());
        } else {
            lines.push(line);
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading_blank = lines.iter().take_while(|l| l.is_empty()).count();

    lines[leading_blank..].join("\n")
}

fn expand_tabs(line: &str) -> String {
    const TAB_SIZE: usize = 8;
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
