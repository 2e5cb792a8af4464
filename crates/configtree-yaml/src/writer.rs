//! Block-style YAML output via the visitor protocol.

use configtree_core::{ConfigError, ConfigNode, ConfigVisitor, ContainerKind, NodeKey, Scalar};

const INDENT: usize = 2;

/// Renders a node tree as block-style YAML.
///
/// Mappings and lists nested in lists start on the dash line (`- key: v`,
/// `- - v`). Empty containers are written in flow style (`{}`, `[]`). An
/// absent root writes nothing.
#[derive(Debug, Clone, Default)]
pub struct YamlWriter;

/// Where the next token goes on the current output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Line {
    /// At the start of a line.
    #[default]
    Fresh,
    /// After `key:`; a value follows after a space.
    AfterKey,
    /// After `- `; a value or a nested entry follows directly.
    AfterDash,
}

#[derive(Debug)]
struct Frame {
    kind: ContainerKind,
    /// Column of this container's entries.
    indent: usize,
}

#[derive(Debug, Default)]
pub struct YamlState {
    out: String,
    frames: Vec<Frame>,
    line: Line,
    comments: bool,
}

impl YamlWriter {
    pub fn new() -> Self {
        YamlWriter
    }
}

impl YamlState {
    fn pad(&mut self, width: usize) {
        self.out.push_str(&" ".repeat(width));
    }

    /// Column of the node being entered.
    fn current_indent(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.indent)
    }

    fn write_comment(&mut self, comment: &str) {
        if self.line == Line::AfterDash {
            // "- " cannot carry a comment line; close it as a bare dash
            self.out.truncate(self.out.trim_end_matches(' ').len());
            self.out.push('\n');
            self.line = Line::Fresh;
        }
        let indent = self.current_indent();
        for line in comment.lines() {
            self.pad(indent);
            if line.is_empty() {
                self.out.push_str("#\n");
            } else {
                self.out.push_str("# ");
                self.out.push_str(line);
                self.out.push('\n');
            }
        }
    }

    /// Start a line unless the previous entry left one open.
    fn begin_entry(&mut self) {
        if self.line != Line::AfterDash {
            let indent = self.current_indent();
            self.pad(indent);
        }
    }

    fn write_terminal(&mut self, text: &str) {
        if self.line == Line::AfterKey {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
        self.line = Line::Fresh;
    }

    fn open(&mut self, node: &ConfigNode, kind: ContainerKind) {
        let indent = if self.frames.is_empty() {
            0
        } else {
            self.current_indent() + INDENT
        };
        if node.is_empty() {
            self.write_terminal(match kind {
                ContainerKind::Mapping => "{}",
                ContainerKind::List => "[]",
            });
        } else if self.line == Line::AfterKey {
            self.out.push('\n');
            self.line = Line::Fresh;
        }
        self.frames.push(Frame { kind, indent });
    }
}

impl ConfigVisitor for YamlWriter {
    type State = YamlState;
    type Output = String;
    type Error = ConfigError;

    fn new_state(&mut self) -> YamlState {
        YamlState::default()
    }

    fn begin_visit(&mut self, node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        let options = node.options();
        state.comments = options.preserve_comments;
        if node.key().is_none() {
            if let Some(header) = options.header {
                state.write_comment(&header);
                state.out.push('\n');
            }
        }
        Ok(())
    }

    fn enter_node(&mut self, node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        if state.comments {
            if let Some(comment) = node.comment() {
                state.write_comment(&comment);
            }
        }

        match state.frames.last().map(|frame| frame.kind) {
            Some(ContainerKind::Mapping) => {
                state.begin_entry();
                if let Some(NodeKey::Name(key)) = node.key() {
                    state.out.push_str(&format_string(&key));
                }
                state.out.push(':');
                state.line = Line::AfterKey;
            }
            Some(ContainerKind::List) => {
                state.begin_entry();
                state.out.push_str("- ");
                state.line = Line::AfterDash;
            }
            None => {}
        }
        Ok(())
    }

    fn enter_mapping_node(&mut self, node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        state.open(node, ContainerKind::Mapping);
        Ok(())
    }

    fn enter_list_node(&mut self, node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        state.open(node, ContainerKind::List);
        Ok(())
    }

    fn enter_scalar_node(&mut self, node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        match node.get_scalar() {
            Some(scalar) => state.write_terminal(&format_scalar(&scalar)),
            None if state.frames.is_empty() => {}
            None => state.write_terminal("null"),
        }
        Ok(())
    }

    fn exit_mapping_node(&mut self, _node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        state.frames.pop();
        Ok(())
    }

    fn exit_list_node(&mut self, _node: &ConfigNode, state: &mut YamlState) -> Result<(), ConfigError> {
        state.frames.pop();
        Ok(())
    }

    fn end_visit(&mut self, state: YamlState) -> Result<String, ConfigError> {
        Ok(state.out)
    }
}

fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) if f.is_nan() => String::from(".nan"),
        Scalar::Float(f) if f.is_infinite() => {
            String::from(if f.is_sign_positive() { ".inf" } else { "-.inf" })
        }
        // Debug keeps a '.' or exponent, so the value reads back as a float
        Scalar::Float(f) => format!("{:?}", f),
        Scalar::String(s) => format_string(s),
    }
}

/// Words a YAML reader may resolve to something other than a string.
const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "y", "n"];

fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && !s.ends_with(' ')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-' | '/'))
        && !RESERVED.iter().any(|word| word.eq_ignore_ascii_case(s))
}

fn format_string(s: &str) -> String {
    if is_plain_safe(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
