//! YAML parser that builds configtree values from parser events.

use crate::FORMAT_NAME;
use configtree_core::{ConfigError, Document, NodeKey, Result, Value};
use indexmap::IndexMap;
use std::mem;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML text into a [`Document`].
///
/// Only the first document of the stream is read. Plain scalars are resolved
/// with the YAML 1.2 core schema; quoted and block scalars are strings.
/// A run of `#` lines directly above a mapping key that starts its line
/// becomes that entry's comment.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for syntax errors, aliases, complex mapping
/// keys and values that do not match an explicit `!!` tag.
pub fn parse_document(input: &str) -> Result<Document> {
    let mut parser = Parser::new_from_str(input);
    let mut builder = ValueBuilder::new(input);

    parser
        .load(&mut builder, false)
        .map_err(|e| ConfigError::parse(FORMAT_NAME, e))?;

    let comments = mem::take(&mut builder.comments);
    Ok(Document {
        header: extract_header(input),
        value: builder.finish()?,
        comments,
    })
}

/// The `#` lines directly above `line` (1-based), when the key at `col` is
/// the first token on its line.
fn comment_above(lines: &[&str], line: usize, col: usize) -> Option<String> {
    let index = line.checked_sub(1)?;
    let prefix: String = lines.get(index)?.chars().take(col).collect();
    if !prefix.chars().all(|c| c == ' ' || c == '-') {
        return None;
    }
    let mut block = Vec::new();
    for above in lines[..index].iter().rev() {
        match above.trim().strip_prefix('#') {
            Some(text) => block.push(text.strip_prefix(' ').unwrap_or(text)),
            None => break,
        }
    }
    if block.is_empty() {
        return None;
    }
    block.reverse();
    Some(block.join("\n"))
}

/// Leading `#` lines terminated by a blank line.
fn extract_header(input: &str) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if let Some(comment) = line.strip_prefix('#') {
            lines.push(comment.strip_prefix(' ').unwrap_or(comment));
        } else if line.is_empty() {
            if !lines.is_empty() {
                return Some(lines.join("\n"));
            }
        } else {
            return None;
        }
    }
    None
}

/// A container being built.
enum Building {
    Sequence(Vec<Value>),
    Mapping {
        entries: IndexMap<String, Value>,
        key: Option<String>,
    },
}

struct ValueBuilder<'a> {
    lines: Vec<&'a str>,
    stack: Vec<Building>,
    root: Option<Value>,
    comments: IndexMap<Vec<NodeKey>, String>,
    error: Option<String>,
}

impl<'a> ValueBuilder<'a> {
    fn new(input: &'a str) -> Self {
        ValueBuilder {
            lines: input.lines().collect(),
            stack: Vec::new(),
            root: None,
            comments: IndexMap::new(),
            error: None,
        }
    }

    /// Path of the entry keyed `key` in the innermost mapping.
    fn key_path(&self, key: &str) -> Vec<NodeKey> {
        let mut path: Vec<NodeKey> = self
            .stack
            .iter()
            .filter_map(|building| match building {
                Building::Sequence(items) => Some(NodeKey::Index(items.len())),
                Building::Mapping { key, .. } => key.as_deref().map(NodeKey::from),
            })
            .collect();
        path.push(NodeKey::from(key));
        path
    }

    fn finish(self) -> Result<Value> {
        match self.error {
            Some(message) => Err(ConfigError::parse(FORMAT_NAME, message)),
            None => Ok(self.root.unwrap_or_default()),
        }
    }

    fn fail(&mut self, message: impl Into<String>, marker: Marker) {
        if self.error.is_none() {
            self.error = Some(format!(
                "{} at line {} column {}",
                message.into(),
                marker.line(),
                marker.col() + 1
            ));
        }
    }

    /// True when the innermost container is a mapping waiting for a key.
    fn expects_key(&self) -> bool {
        matches!(self.stack.last(), Some(Building::Mapping { key: None, .. }))
    }

    fn push_complete(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Building::Sequence(items)) => items.push(value),
            Some(Building::Mapping { entries, key }) => {
                if let Some(key) = key.take() {
                    entries.insert(key, value);
                }
            }
        }
    }

    fn start(&mut self, building: Building, marker: Marker) {
        if self.expects_key() {
            self.fail("complex mapping keys are not supported", marker);
            return;
        }
        self.stack.push(building);
    }

    fn scalar(&mut self, text: String, style: TScalarStyle, tag: Option<Tag>, marker: Marker) {
        if self.expects_key() {
            if let Some(comment) = comment_above(&self.lines, marker.line(), marker.col()) {
                let path = self.key_path(&text);
                self.comments.insert(path, comment);
            }
            if let Some(Building::Mapping { key, .. }) = self.stack.last_mut() {
                *key = Some(text);
            }
            return;
        }

        let value = match tag.as_ref().and_then(core_tag) {
            Some(kind) => match resolve_tagged(kind, &text) {
                Some(value) => value,
                None => {
                    self.fail(format!("invalid !!{} value {:?}", kind, text), marker);
                    return;
                }
            },
            None if style == TScalarStyle::Plain => resolve_plain(&text),
            None => Value::from(text),
        };
        self.push_complete(value);
    }
}

impl MarkedEventReceiver for ValueBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(text, style, _anchor_id, tag) => self.scalar(text, style, tag, marker),

            Event::SequenceStart(_anchor_id, _tag) => {
                self.start(Building::Sequence(Vec::new()), marker);
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.start(
                    Building::Mapping {
                        entries: IndexMap::new(),
                        key: None,
                    },
                    marker,
                );
            }

            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Building::Sequence(items)) => self.push_complete(Value::List(items)),
                Some(Building::Mapping { entries, .. }) => self.push_complete(Value::Map(entries)),
                None => self.fail("unbalanced collection end", marker),
            },

            Event::Alias(_anchor_id) => self.fail("aliases are not supported", marker),
        }
    }
}

/// Suffix of a `tag:yaml.org,2002:` tag.
fn core_tag(tag: &Tag) -> Option<&str> {
    match tag.handle.as_str() {
        "tag:yaml.org,2002:" | "!!" => Some(tag.suffix.as_str()),
        _ => None,
    }
}

fn resolve_tagged(kind: &str, text: &str) -> Option<Value> {
    match kind {
        "str" => Some(Value::from(text)),
        "null" => is_null(text).then_some(Value::Null),
        "bool" => parse_bool(text).map(Value::from),
        "int" => parse_int(text).map(Value::from),
        "float" => parse_float(text)
            .or_else(|| parse_int(text).map(|i| i as f64))
            .map(Value::from),
        _ => Some(Value::from(text)),
    }
}

/// Type a plain scalar: null, bool, int, float, else string.
fn resolve_plain(text: &str) -> Value {
    if is_null(text) {
        return Value::Null;
    }
    if let Some(b) = parse_bool(text) {
        return Value::from(b);
    }
    if let Some(i) = parse_int(text) {
        return Value::from(i);
    }
    if let Some(f) = parse_float(text) {
        return Value::from(f);
    }
    Value::from(text)
}

fn is_null(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let radix_digits = |digits: &str, radix: u32| {
        // from_str_radix would accept a sign here
        if digits.starts_with(['+', '-']) {
            None
        } else {
            i64::from_str_radix(digits, radix).ok()
        }
    };
    if let Some(hex) = text.strip_prefix("0x") {
        return radix_digits(hex, 16);
    }
    if let Some(octal) = text.strip_prefix("0o") {
        return radix_digits(octal, 8);
    }
    text.parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    // Rust also accepts "inf" and "NaN", which YAML treats as strings
    let numeric = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if numeric { text.parse().ok() } else { None }
}
