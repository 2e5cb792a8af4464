//! Format-agnostic configuration node tree.
//!
//! This crate provides an in-memory tree of untyped configuration values that
//! format collaborators (JSON, YAML, ...) populate and serialize, and that user
//! code reads and writes through path navigation.
//!
//! # Key Features
//!
//! - **Lazy auto-vivification**: navigating to a missing path yields a virtual
//!   node; the tree only changes once something is written through it
//! - **Comments and headers**: every node may carry a comment, every tree a header
//! - **Additive merging**: [`ConfigNode::merge_values_from`] fills gaps without
//!   overwriting existing values
//! - **Visitors**: an explicit-stack depth-first walk with matched
//!   enter/exit events for every container
//!
//! # Architecture
//!
//! - [`Value`] / [`Scalar`]: owned plain values used to set and read content
//! - [`ConfigNode`]: the mutable tree node (a cheap handle)
//! - [`ConfigVisitor`] / [`NodeEnd`]: the traversal protocol
//! - [`ConfigFormat`] / [`ConfigLoader`]: the seam format crates plug into
//!
//! # Example
//!
//! ```rust
//! use configtree_core::{ConfigNode, Value};
//!
//! let root = ConfigNode::root();
//! root.get_node(["server", "port"]).set_value(8080);
//!
//! // Reads never create nodes
//! assert!(root.get_node(["server", "host"]).is_virtual());
//! assert!(!root.exists(["server", "host"]));
//!
//! assert_eq!(root.get_node(["server", "port"]).get_value(), Value::from(8080));
//! ```
//!
//! # Threading
//!
//! Nodes are built on `Rc`/`RefCell` and are neither `Send` nor `Sync`.
//! A tree belongs to one thread; callers needing shared access serialize it
//! themselves.

mod error;
mod loader;
mod merge;
mod node;
mod options;
mod value;
mod visitor;

pub use error::{ConfigError, Result};

pub use loader::{ConfigFormat, ConfigLoader, Document};

pub use node::{ConfigNode, NodeKey, NodeKind, format_path};

pub use options::ConfigOptions;

pub use value::{Scalar, Value};

pub use visitor::{ConfigVisitor, ContainerKind, NodeEnd};
