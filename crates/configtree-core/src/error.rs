//! Error types for loading and saving configuration trees.
//!
//! Navigating the tree never fails, so only the collaborator layer (formats and
//! the loader) produces these.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configtree operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The input text is not valid for the format.
    #[error("Failed to parse {format} input: {message}")]
    Parse {
        /// Name of the format
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// A value in the tree has no representation in the target format.
    #[error("Cannot write value at {path} as {format}: {message}")]
    Unrepresentable {
        /// Name of the format
        format: &'static str,
        /// Dotted path of the offending node
        path: String,
        /// What went wrong
        message: String,
    },

    /// `load` was called on a loader without a source.
    #[error("No source configured for this loader")]
    NoSource,

    /// `save` was called on a loader without a sink.
    #[error("No sink configured for this loader")]
    NoSink,
}

impl ConfigError {
    /// Build a [`ConfigError::Parse`] from any displayable parser error.
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        ConfigError::Parse {
            format,
            message: message.to_string(),
        }
    }
}
