//! Loading and saving trees through a text format.
//!
//! A [`ConfigFormat`] turns text into a [`Document`] and a node back into text.
//! [`ConfigLoader`] wraps a format with an optional source and sink file and
//! the options new roots are created with.
//!
//! # Example
//!
//! ```rust,ignore
//! let loader = ConfigLoader::new(YamlFormat::default()).with_path("app.yaml");
//! let root = loader.load()?;
//! root.get_node(["server", "port"]).set_value(8080);
//! loader.save(&root)?;
//! ```

use crate::error::{ConfigError, Result};
use crate::node::{ConfigNode, NodeKey, format_path};
use crate::options::ConfigOptions;
use crate::value::Value;
use indexmap::IndexMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A parsed document: optional header text, the root value, and the
/// comments found on nodes below the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub header: Option<String>,
    pub value: Value,
    /// Node comments keyed by the path of the node they precede.
    pub comments: IndexMap<Vec<NodeKey>, String>,
}

/// A textual encoding of node trees.
pub trait ConfigFormat {
    /// Short name used in errors and logs (e.g. `"json"`).
    fn name(&self) -> &'static str;

    /// Parse text into a document. Empty input yields an empty document.
    fn parse(&self, input: &str) -> Result<Document>;

    /// Render a node (usually a root) as text.
    fn render(&self, node: &ConfigNode) -> Result<String>;
}

/// Loads trees from, and saves them to, files in one format.
#[derive(Debug, Clone)]
pub struct ConfigLoader<F> {
    format: F,
    source: Option<PathBuf>,
    sink: Option<PathBuf>,
    options: ConfigOptions,
}

impl<F: ConfigFormat> ConfigLoader<F> {
    pub fn new(format: F) -> Self {
        ConfigLoader {
            format,
            source: None,
            sink: None,
            options: ConfigOptions::default(),
        }
    }

    /// Read from and write to the same file.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.with_source(path.clone()).with_sink(path)
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn with_sink(mut self, path: impl Into<PathBuf>) -> Self {
        self.sink = Some(path.into());
        self
    }

    /// Options every root created by this loader starts with.
    pub fn with_options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    /// An empty root with this loader's options.
    pub fn create_empty_node(&self) -> ConfigNode {
        ConfigNode::root_with_options(self.options.clone())
    }

    /// Load the source file.
    ///
    /// A missing file is not an error: it loads as an empty root, so a
    /// first run can populate defaults and save.
    pub fn load(&self) -> Result<ConfigNode> {
        let path = self.source.as_deref().ok_or(ConfigError::NoSource)?;
        tracing::debug!(
            format = self.format.name(),
            path = %path.display(),
            "Loading configuration"
        );

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Configuration file not found, starting empty");
                return Ok(self.create_empty_node());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        self.load_str(&text)
    }

    /// Parse `input` into a new root.
    ///
    /// The document's header is used when this loader's options carry none.
    /// Comments are applied to the nodes they belong to; a comment whose path
    /// is not in the parsed value is dropped.
    pub fn load_str(&self, input: &str) -> Result<ConfigNode> {
        let document = self.format.parse(input)?;
        let mut options = self.options.clone();
        if options.header.is_none() {
            options.header = document.header;
        }
        let root = ConfigNode::root_with_options(options);
        root.set_value(document.value);
        for (path, comment) in document.comments {
            if root.exists(path.iter().cloned()) {
                root.get_node(path).set_comment(comment);
            } else {
                tracing::debug!(path = %format_path(&path), "Dropping comment for missing node");
            }
        }
        Ok(root)
    }

    /// Render `node` and atomically replace the sink file with it.
    pub fn save(&self, node: &ConfigNode) -> Result<()> {
        let path = self.sink.as_deref().ok_or(ConfigError::NoSink)?;
        let text = self.format.render(node)?;
        tracing::debug!(
            format = self.format.name(),
            path = %path.display(),
            bytes = text.len(),
            "Saving configuration"
        );
        write_atomic(path, &text)
    }

    pub fn save_to_string(&self, node: &ConfigNode) -> Result<String> {
        self.format.render(node)
    }
}

/// Write to a temporary file next to `path`, then move it into place.
fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(text.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
