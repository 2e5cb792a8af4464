//! Per-tree configuration options.

/// Options shared by every node of a tree.
///
/// Set when the root is created (directly or by a loader) and inherited by
/// every node navigated or copied into that tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Header text written at the top of the document by formats that
    /// support comments.
    pub header: Option<String>,

    /// Keep every mapping sorted by key instead of insertion order.
    pub sort_keys: bool,

    /// Emit node comments when writing (default: true).
    pub preserve_comments: bool,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            header: None,
            sort_keys: false,
            preserve_comments: true,
        }
    }
}

impl ConfigOptions {
    /// Set the document header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Keep mappings sorted by key.
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Control whether writers emit comments.
    pub fn with_preserve_comments(mut self, preserve_comments: bool) -> Self {
        self.preserve_comments = preserve_comments;
        self
    }
}
