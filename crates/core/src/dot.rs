//! # DOT Rendering
//!
//! Graphviz output for an [`Admg`], plus a reader for the same subset so a
//! rendered graph can be loaded back.
//!
//! ```text
//! digraph {
//!   "x" [pos="0,0!"];
//!   "m";
//!   "x" -> "m";
//!   "x" -> "y" [dir=both, style=dashed, constraint=false];
//! }
//! ```
//!
//! Bidirected edges are drawn as dashed double-headed arrows that do not
//! constrain the layout. Synonyms are not part of the picture.

use std::collections::HashMap;

use crate::admg::Admg;
use crate::error::GraphError;
use crate::symbol::Symbol;

const BIDIRECTED_ATTRS: &str = "dir=both, style=dashed, constraint=false";

impl Admg {
    /// Render as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        self.to_dot_with_positions(&HashMap::new())
    }

    /// Render as Graphviz DOT, pinning the listed vertices at `(x, y)`.
    pub fn to_dot_with_positions(&self, positions: &HashMap<Symbol, (f64, f64)>) -> String {
        let mut output = String::new();
        output.push_str("digraph {\n");

        for v in self.vertices() {
            match positions.get(v) {
                Some((x, y)) => {
                    output.push_str(&format!("  {} [pos=\"{},{}!\"];\n", quote(v.as_str()), x, y))
                }
                None => output.push_str(&format!("  {};\n", quote(v.as_str()))),
            }
        }

        for (a, b) in self.directed_edges() {
            output.push_str(&format!("  {} -> {};\n", quote(a.as_str()), quote(b.as_str())));
        }

        for (a, b) in self.bidirected_edges() {
            output.push_str(&format!(
                "  {} -> {} [{}];\n",
                quote(a.as_str()),
                quote(b.as_str()),
                BIDIRECTED_ATTRS
            ));
        }

        output.push_str("}\n");
        output
    }

    /// Read back the DOT subset written by [`Admg::to_dot`].
    ///
    /// One statement per line. An edge whose attributes contain `dir=both`
    /// is bidirected. Endpoints that were never declared become vertices.
    pub fn from_dot(dot: &str) -> Result<Admg, GraphError> {
        let mut builder = Admg::builder();
        let mut opened = false;

        for (i, raw) in dot.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if !opened {
                if line.starts_with("digraph") && line.ends_with('{') {
                    opened = true;
                    continue;
                }
                return Err(parse_error(line_no, "expected `digraph {`"));
            }
            if line == "}" {
                return builder.build();
            }

            let statement = line.strip_suffix(';').unwrap_or(line).trim();
            let (first, rest) =
                take_id(statement).ok_or_else(|| parse_error(line_no, "expected a vertex name"))?;
            let rest = rest.trim_start();

            if let Some(after_arrow) = rest.strip_prefix("->") {
                let (second, rest) = take_id(after_arrow)
                    .ok_or_else(|| parse_error(line_no, "expected a vertex after `->`"))?;
                let attrs = take_attrs(rest).map_err(|reason| parse_error(line_no, reason))?;
                builder = builder.vertex(first.as_str()).vertex(second.as_str());
                builder = if attrs.iter().any(|(k, v)| k == "dir" && v == "both") {
                    builder.bidirected_edge(first, second)
                } else {
                    builder.edge(first, second)
                };
            } else {
                take_attrs(rest).map_err(|reason| parse_error(line_no, reason))?;
                builder = builder.vertex(first);
            }
        }

        Err(parse_error(dot.lines().count(), "missing closing `}`"))
    }
}

fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn parse_error(line: usize, reason: &str) -> GraphError {
    GraphError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// A quoted or bare identifier at the start of `input`, and what follows.
fn take_id(input: &str) -> Option<(String, &str)> {
    let input = input.trim_start();
    if let Some(body) = input.strip_prefix('"') {
        let mut name = String::new();
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            match c {
                _ if escaped => {
                    name.push(match c {
                        'n' => '\n',
                        'r' => '\r',
                        _ => c,
                    });
                    escaped = false;
                }
                '\\' => escaped = true,
                '"' => return Some((name, &body[i + 1..])),
                _ => name.push(c),
            }
        }
        None
    } else {
        let end = input
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(input.len());
        if end == 0 {
            return None;
        }
        Some((input[..end].to_string(), &input[end..]))
    }
}

/// Parse an optional `[k=v, ...]` list. Values may be quoted.
fn take_attrs(input: &str) -> Result<Vec<(String, String)>, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let body = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or("expected `[...]` attributes")?;

    let mut attrs = Vec::new();
    for pair in split_unquoted(body) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').ok_or("expected `key=value`")?;
        attrs.push((
            key.trim().to_string(),
            value.trim().trim_matches('"').to_string(),
        ));
    }
    Ok(attrs)
}

/// Split on commas that are not inside double quotes.
fn split_unquoted(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
