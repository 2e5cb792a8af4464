//! YAML support for configtree.
//!
//! [`YamlFormat`] reads the first document of a YAML stream with
//! `yaml-rust2` and writes trees back in block style with two-space
//! indentation.
//!
//! # Comments and headers
//!
//! The writer emits each node comment as `#` lines above the entry, and the
//! tree header as `#` lines followed by a blank line at the top of the file.
//! The reader recovers the header (a leading `#` block that ends with a blank
//! line) and the `#` lines directly above each mapping key. Trailing comments
//! on a value line are not read back.
//!
//! ```rust
//! use configtree_core::{ConfigFormat, ConfigNode, ConfigOptions};
//! use configtree_yaml::YamlFormat;
//!
//! let root = ConfigNode::root_with_options(ConfigOptions::default().with_header("Settings"));
//! root.get_child("name").set_value("dog park").set_comment("Where to go");
//!
//! let text = YamlFormat.render(&root).unwrap();
//! assert_eq!(text, "# Settings\n\n# Where to go\nname: dog park\n");
//!
//! let document = YamlFormat.parse(&text).unwrap();
//! assert_eq!(document.header.as_deref(), Some("Settings"));
//! assert_eq!(document.comments.values().next().map(String::as_str), Some("Where to go"));
//! ```

mod reader;
mod writer;

use configtree_core::{ConfigFormat, ConfigNode, Document, Result};

pub use reader::parse_document;
pub use writer::YamlWriter;

pub(crate) const FORMAT_NAME: &str = "yaml";

/// YAML reader and writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlFormat;

impl ConfigFormat for YamlFormat {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn parse(&self, input: &str) -> Result<Document> {
        parse_document(input)
    }

    fn render(&self, node: &ConfigNode) -> Result<String> {
        node.visit(&mut YamlWriter::new())
    }
}
