//! JSON output via the visitor protocol.

use crate::FORMAT_NAME;
use configtree_core::{ConfigError, ConfigNode, ConfigVisitor, NodeKey, Scalar, format_path};

/// Renders a node tree as JSON text.
///
/// With a non-zero indent every member goes on its own line and the output
/// ends with a newline; with zero indent the output is a single line.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    indent: usize,
}

/// Output buffer plus one frame per open container.
#[derive(Debug, Default)]
pub struct JsonState {
    out: String,
    frames: Vec<Frame>,
}

#[derive(Debug)]
struct Frame {
    mapping: bool,
    members: usize,
}

impl JsonWriter {
    pub fn new(indent: usize) -> Self {
        JsonWriter { indent }
    }

    fn newline(&self, state: &mut JsonState) {
        if self.indent > 0 {
            state.out.push('\n');
            let width = self.indent * state.frames.len();
            state.out.push_str(&" ".repeat(width));
        }
    }

    fn open(&self, state: &mut JsonState, bracket: char, mapping: bool) {
        state.out.push(bracket);
        state.frames.push(Frame {
            mapping,
            members: 0,
        });
    }

    fn close(&self, state: &mut JsonState, bracket: char) {
        if let Some(frame) = state.frames.pop() {
            if frame.members > 0 {
                self.newline(state);
            }
        }
        state.out.push(bracket);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push_str(&serde_json::Value::from(s).to_string());
}

impl ConfigVisitor for JsonWriter {
    type State = JsonState;
    type Output = String;
    type Error = ConfigError;

    fn new_state(&mut self) -> JsonState {
        JsonState::default()
    }

    fn enter_node(&mut self, node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        let Some(frame) = state.frames.last_mut() else {
            return Ok(());
        };
        if frame.members > 0 {
            state.out.push(',');
        }
        frame.members += 1;
        let mapping = frame.mapping;

        self.newline(state);
        if mapping {
            if let Some(NodeKey::Name(key)) = node.key() {
                write_string(&mut state.out, &key);
                state.out.push_str(if self.indent > 0 { ": " } else { ":" });
            }
        }
        Ok(())
    }

    fn enter_mapping_node(&mut self, _node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        self.open(state, '{', true);
        Ok(())
    }

    fn enter_list_node(&mut self, _node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        self.open(state, '[', false);
        Ok(())
    }

    fn enter_scalar_node(&mut self, node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        match node.get_scalar() {
            None => state.out.push_str("null"),
            Some(Scalar::Bool(b)) => state.out.push_str(if b { "true" } else { "false" }),
            Some(Scalar::Int(i)) => state.out.push_str(&i.to_string()),
            Some(Scalar::Float(f)) => {
                let number = serde_json::Number::from_f64(f).ok_or_else(|| ConfigError::Unrepresentable {
                    format: FORMAT_NAME,
                    path: format_path(&node.path()),
                    message: format!("{} is not a finite number", f),
                })?;
                state.out.push_str(&number.to_string());
            }
            Some(Scalar::String(s)) => write_string(&mut state.out, &s),
        }
        Ok(())
    }

    fn exit_mapping_node(&mut self, _node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        self.close(state, '}');
        Ok(())
    }

    fn exit_list_node(&mut self, _node: &ConfigNode, state: &mut JsonState) -> Result<(), ConfigError> {
        self.close(state, ']');
        Ok(())
    }

    fn end_visit(&mut self, mut state: JsonState) -> Result<String, ConfigError> {
        if self.indent > 0 {
            state.out.push('\n');
        }
        Ok(state.out)
    }
}
