//! JSON support for configtree.
//!
//! [`JsonFormat`] implements [`ConfigFormat`] on top of `serde_json`. Reading
//! keeps object key order. Writing walks the tree with a [`ConfigVisitor`]
//! so deep trees do not recurse.
//!
//! JSON has no comments, so node comments and headers are not written.
//!
//! # Example
//!
//! ```rust
//! use configtree_core::{ConfigFormat, ConfigNode};
//! use configtree_json::JsonFormat;
//!
//! let format = JsonFormat::compact();
//! let document = format.parse(r#"{"server": {"port": 8080}}"#).unwrap();
//!
//! let root = ConfigNode::root();
//! root.set_value(document.value);
//! root.get_node(["server", "host"]).set_value("localhost");
//!
//! assert_eq!(
//!     format.render(&root).unwrap(),
//!     r#"{"server":{"port":8080,"host":"localhost"}}"#
//! );
//! ```
//!
//! [`ConfigVisitor`]: configtree_core::ConfigVisitor

mod reader;
mod writer;

use configtree_core::{ConfigFormat, ConfigNode, Document, Result};

pub use reader::parse_document;
pub use writer::JsonWriter;

pub(crate) const FORMAT_NAME: &str = "json";

/// JSON reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    /// Spaces per nesting level. Zero writes everything on one line.
    pub indent: usize,
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat { indent: 2 }
    }
}

impl JsonFormat {
    pub fn with_indent(indent: usize) -> Self {
        JsonFormat { indent }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        JsonFormat { indent: 0 }
    }
}

impl ConfigFormat for JsonFormat {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn parse(&self, input: &str) -> Result<Document> {
        parse_document(input)
    }

    fn render(&self, node: &ConfigNode) -> Result<String> {
        node.visit(&mut JsonWriter::new(self.indent))
    }
}
