//! The mutable configuration tree node.
//!
//! A [`ConfigNode`] is a handle to a shared node. Cloning the handle is cheap
//! and never copies the node; use [`ConfigNode::copy`] or
//! [`ConfigNode::set_node`] for deep copies.
//!
//! # Virtual nodes
//!
//! Navigation ([`ConfigNode::get_child`], [`ConfigNode::get_node`]) never
//! modifies the tree. A missing child comes back as a *virtual* node: it knows
//! its parent and key but is not part of the parent's content. The first write
//! through a virtual node (a value, or a comment) attaches it and every virtual
//! ancestor, converting each absent or scalar parent into a mapping or list as
//! the key requires. A key that does not fit an existing container (an index
//! under a mapping, a name under a list) leaves the node virtual.
//!
//! ```rust
//! use configtree_core::ConfigNode;
//!
//! let root = ConfigNode::root();
//! let level = root.get_node(["test", "op-level"]);
//! assert!(level.is_virtual());
//! assert!(root.is_absent());
//!
//! level.set_value("unicorn");
//! assert!(root.is_map());
//! assert_eq!(root.get_node(["test", "op-level"]).get_string().as_deref(), Some("unicorn"));
//! ```

use crate::options::ConfigOptions;
use crate::value::{Scalar, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

pub(crate) type NodeRef = Rc<RefCell<NodeData>>;

/// Key of a node within its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Key in a mapping.
    Name(String),

    /// Position in a list.
    Index(usize),
}

impl From<&str> for NodeKey {
    fn from(name: &str) -> Self {
        NodeKey::Name(name.to_string())
    }
}

impl From<&String> for NodeKey {
    fn from(name: &String) -> Self {
        NodeKey::Name(name.clone())
    }
}

impl From<String> for NodeKey {
    fn from(name: String) -> Self {
        NodeKey::Name(name)
    }
}

impl From<usize> for NodeKey {
    fn from(index: usize) -> Self {
        NodeKey::Index(index)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Name(name) => f.write_str(name),
            NodeKey::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Render a node path as `a.b[0].c`. The empty path renders as `<root>`.
pub fn format_path(path: &[NodeKey]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    let mut out = String::new();
    for key in path {
        match key {
            NodeKey::Name(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            NodeKey::Index(_) => out.push_str(&key.to_string()),
        }
    }
    out
}

/// The kind of content a node currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Absent,
    Scalar,
    List,
    Map,
}

/// How a node hangs off its parent.
pub(crate) enum ParentLink {
    /// Tree root (or a detached copy); always attached.
    Root,

    /// Virtual: not yet part of the parent's content. Holds the parent alive
    /// so chains of virtual nodes survive until they are written.
    Pending(NodeRef),

    /// Part of the parent's content; the parent owns this node.
    Attached(Weak<RefCell<NodeData>>),
}

pub(crate) enum NodeContent {
    Absent,
    Scalar(Scalar),
    List(Vec<ConfigNode>),
    Map(IndexMap<String, ConfigNode>),
}

impl NodeContent {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            NodeContent::Absent => NodeKind::Absent,
            NodeContent::Scalar(_) => NodeKind::Scalar,
            NodeContent::List(_) => NodeKind::List,
            NodeContent::Map(_) => NodeKind::Map,
        }
    }

    fn into_children(self) -> Vec<ConfigNode> {
        match self {
            NodeContent::List(items) => items,
            NodeContent::Map(entries) => entries.into_values().collect(),
            NodeContent::Absent | NodeContent::Scalar(_) => Vec::new(),
        }
    }
}

pub(crate) struct NodeData {
    pub(crate) key: Option<NodeKey>,
    pub(crate) parent: ParentLink,
    /// Resolve the index at attach time by pushing onto the parent list.
    append: bool,
    pub(crate) comment: Option<String>,
    pub(crate) content: NodeContent,
    pub(crate) options: Rc<ConfigOptions>,
}

/// A node in a configuration tree.
///
/// Equality (`==`) is structural: same kind and recursively equal content.
/// Mapping order and comments are ignored. Use [`ConfigNode::same_node`] for
/// identity.
#[derive(Clone)]
pub struct ConfigNode {
    pub(crate) inner: NodeRef,
}

impl ConfigNode {
    /// Create an empty root with default options.
    pub fn root() -> Self {
        Self::root_with_options(ConfigOptions::default())
    }

    /// Create an empty root with the given options.
    pub fn root_with_options(options: ConfigOptions) -> Self {
        Self::from_data(NodeData {
            key: None,
            parent: ParentLink::Root,
            append: false,
            comment: None,
            content: NodeContent::Absent,
            options: Rc::new(options),
        })
    }

    fn from_data(data: NodeData) -> Self {
        ConfigNode {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    fn from_ref(inner: NodeRef) -> Self {
        ConfigNode { inner }
    }

    /// Create a child whose parent link is `parent`, sharing this tree's options.
    fn new_child(&self, key: NodeKey, parent: ParentLink) -> ConfigNode {
        let options = self.inner.borrow().options.clone();
        Self::from_data(NodeData {
            key: Some(key),
            parent,
            append: false,
            comment: None,
            content: NodeContent::Absent,
            options,
        })
    }

    fn attached_child(&self, key: NodeKey) -> ConfigNode {
        self.new_child(key, ParentLink::Attached(Rc::downgrade(&self.inner)))
    }

    fn virtual_child(&self, key: NodeKey) -> ConfigNode {
        self.new_child(key, ParentLink::Pending(self.inner.clone()))
    }

    // Identity and position

    /// True if both handles refer to the same node.
    pub fn same_node(&self, other: &ConfigNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The options of the tree this node belongs to.
    pub fn options(&self) -> ConfigOptions {
        self.inner.borrow().options.as_ref().clone()
    }

    /// Key of this node in its parent, `None` for a root.
    pub fn key(&self) -> Option<NodeKey> {
        self.inner.borrow().key.clone()
    }

    /// The parent node. Virtual nodes report the parent they will attach to.
    pub fn parent(&self) -> Option<ConfigNode> {
        match &self.inner.borrow().parent {
            ParentLink::Root => None,
            ParentLink::Pending(parent) => Some(Self::from_ref(parent.clone())),
            ParentLink::Attached(parent) => parent.upgrade().map(Self::from_ref),
        }
    }

    /// Keys from the root down to this node.
    pub fn path(&self) -> Vec<NodeKey> {
        let mut path = Vec::new();
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if let Some(key) = node.key() {
                path.push(key);
            }
            current = node.parent();
        }
        path.reverse();
        path
    }

    /// True if this node is not (yet) part of its parent's content.
    pub fn is_virtual(&self) -> bool {
        matches!(self.inner.borrow().parent, ParentLink::Pending(_))
    }

    // Kind

    pub fn kind(&self) -> NodeKind {
        self.inner.borrow().content.kind()
    }

    pub fn is_absent(&self) -> bool {
        self.kind() == NodeKind::Absent
    }

    pub fn is_scalar(&self) -> bool {
        self.kind() == NodeKind::Scalar
    }

    pub fn is_list(&self) -> bool {
        self.kind() == NodeKind::List
    }

    pub fn is_map(&self) -> bool {
        self.kind() == NodeKind::Map
    }

    /// True for absent nodes and empty containers.
    pub fn is_empty(&self) -> bool {
        match &self.inner.borrow().content {
            NodeContent::Absent => true,
            NodeContent::Scalar(_) => false,
            NodeContent::List(items) => items.is_empty(),
            NodeContent::Map(entries) => entries.is_empty(),
        }
    }

    // Navigation

    fn lookup(&self, key: &NodeKey) -> Option<ConfigNode> {
        match (&self.inner.borrow().content, key) {
            (NodeContent::Map(entries), NodeKey::Name(name)) => entries.get(name).cloned(),
            (NodeContent::List(items), NodeKey::Index(index)) => items.get(*index).cloned(),
            _ => None,
        }
    }

    /// Get a child, or a virtual absent node if there is none.
    ///
    /// Never fails and never modifies the tree.
    pub fn get_child(&self, key: impl Into<NodeKey>) -> ConfigNode {
        let key = key.into();
        self.lookup(&key).unwrap_or_else(|| self.virtual_child(key))
    }

    /// Follow a path of keys, returning the existing node or a virtual one.
    pub fn get_node<I>(&self, path: I) -> ConfigNode
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        path.into_iter()
            .fold(self.clone(), |node, key| node.get_child(key))
    }

    /// Navigate to a path for writing.
    ///
    /// Name segments vivify mappings, index segments vivify lists (padding
    /// with absent nodes up to the index). Containers are created lazily: the
    /// chain attaches only once a value or comment is written below it.
    pub fn get_or_create<I>(&self, path: I) -> ConfigNode
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        self.get_node(path)
    }

    /// A virtual node that will be appended to this list when written.
    pub fn append_list_node(&self) -> ConfigNode {
        let index = match &self.inner.borrow().content {
            NodeContent::List(items) => items.len(),
            _ => 0,
        };
        let child = self.virtual_child(NodeKey::Index(index));
        child.inner.borrow_mut().append = true;
        child
    }

    /// True if this node has a child at `key`.
    pub fn has_child(&self, key: impl Into<NodeKey>) -> bool {
        self.lookup(&key.into()).is_some()
    }

    /// True if every segment of `path` exists. Creates nothing.
    pub fn exists<I>(&self, path: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        let mut current = self.clone();
        for key in path {
            match current.lookup(&key.into()) {
                Some(child) => current = child,
                None => return false,
            }
        }
        true
    }

    /// Handles to the children of a list node (empty otherwise).
    pub fn list_children(&self) -> Vec<ConfigNode> {
        match &self.inner.borrow().content {
            NodeContent::List(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Handles to the children of a mapping node (empty otherwise).
    pub fn map_children(&self) -> IndexMap<String, ConfigNode> {
        match &self.inner.borrow().content {
            NodeContent::Map(entries) => entries.clone(),
            _ => IndexMap::new(),
        }
    }

    // Reading

    /// Deep snapshot of this node's content.
    pub fn get_value(&self) -> Value {
        match &self.inner.borrow().content {
            NodeContent::Absent => Value::Null,
            NodeContent::Scalar(scalar) => Value::Scalar(scalar.clone()),
            NodeContent::List(items) => Value::List(items.iter().map(Self::get_value).collect()),
            NodeContent::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, child)| (key.clone(), child.get_value()))
                    .collect(),
            ),
        }
    }

    pub fn get_scalar(&self) -> Option<Scalar> {
        match &self.inner.borrow().content {
            NodeContent::Scalar(scalar) => Some(scalar.clone()),
            _ => None,
        }
    }

    pub fn get_string(&self) -> Option<String> {
        self.get_scalar()
            .and_then(|s| s.as_str().map(str::to_string))
    }

    pub fn get_i64(&self) -> Option<i64> {
        self.get_scalar().and_then(|s| s.as_i64())
    }

    pub fn get_f64(&self) -> Option<f64> {
        self.get_scalar().and_then(|s| s.as_f64())
    }

    pub fn get_bool(&self) -> Option<bool> {
        self.get_scalar().and_then(|s| s.as_bool())
    }

    pub fn get_string_or(&self, default: &str) -> String {
        self.get_string().unwrap_or_else(|| default.to_string())
    }

    pub fn get_i64_or(&self, default: i64) -> i64 {
        self.get_i64().unwrap_or(default)
    }

    pub fn get_f64_or(&self, default: f64) -> f64 {
        self.get_f64().unwrap_or(default)
    }

    pub fn get_bool_or(&self, default: bool) -> bool {
        self.get_bool().unwrap_or(default)
    }

    pub fn comment(&self) -> Option<String> {
        self.inner.borrow().comment.clone()
    }

    // Writing

    /// Set this node's content.
    ///
    /// Containers in `value` become fresh child nodes. `Value::Null` detaches
    /// this node from its parent and clears it; nulls nested inside a list or
    /// map become absent children.
    pub fn set_value(&self, value: impl Into<Value>) -> &Self {
        let value = value.into();
        if value.is_null() {
            self.detach();
            self.replace_content(NodeContent::Absent);
            return self;
        }
        self.attach();
        let content = self.build_content(value);
        self.replace_content(content);
        self
    }

    /// Deep-copy another node's content and comments into this node.
    ///
    /// The copy shares nothing with `other`. This node keeps its own comment
    /// unless `other` has one.
    pub fn set_node(&self, other: &ConfigNode) -> &Self {
        if self.same_node(other) {
            return self;
        }
        if other.is_absent() {
            return self.set_value(Value::Null);
        }
        // Copy before attaching: attaching may insert this node into `other`.
        let content = other.copy_content_into(self);
        self.attach();
        self.replace_content(content);
        if let Some(comment) = other.comment() {
            self.inner.borrow_mut().comment = Some(comment);
        }
        self
    }

    /// Set the comment, attaching this node if it is virtual.
    pub fn set_comment(&self, comment: impl Into<String>) -> &Self {
        self.attach();
        self.inner.borrow_mut().comment = Some(comment.into());
        self
    }

    /// Set the comment only if the node has none.
    pub fn set_comment_if_absent(&self, comment: impl Into<String>) -> &Self {
        if self.inner.borrow().comment.is_none() {
            self.set_comment(comment);
        }
        self
    }

    pub fn clear_comment(&self) -> &Self {
        self.inner.borrow_mut().comment = None;
        self
    }

    /// Detach the child at `key`. Later list elements shift down.
    ///
    /// Returns false if there was no such child.
    pub fn remove_child(&self, key: impl Into<NodeKey>) -> bool {
        self.take_child(&key.into()).is_some()
    }

    /// Deep copy as a new root with the same options.
    pub fn copy(&self) -> ConfigNode {
        let options = self.inner.borrow().options.clone();
        let copy = Self::from_data(NodeData {
            key: None,
            parent: ParentLink::Root,
            append: false,
            comment: self.comment(),
            content: NodeContent::Absent,
            options,
        });
        let content = self.copy_content_into(&copy);
        copy.inner.borrow_mut().content = content;
        copy
    }

    // Tree maintenance

    /// Attach this node and its virtual ancestors.
    ///
    /// Returns false, leaving this node virtual, if the parent holds a
    /// container of the other kind than this node's key needs.
    pub(crate) fn attach(&self) -> bool {
        let parent = match &self.inner.borrow().parent {
            ParentLink::Pending(parent) => Self::from_ref(parent.clone()),
            ParentLink::Root | ParentLink::Attached(_) => return true,
        };
        parent.attach();
        if !parent.adopt(self) {
            tracing::debug!(
                path = %format_path(&self.path()),
                "Key does not fit the parent container, node left virtual"
            );
            return false;
        }
        let mut data = self.inner.borrow_mut();
        data.parent = ParentLink::Attached(Rc::downgrade(&parent.inner));
        data.append = false;
        true
    }

    /// Insert `child` into this node's content at the child's key.
    ///
    /// An absent or scalar node becomes the container kind the key requires.
    /// A mapping never takes an index key and a list never takes a name, so
    /// existing children are never dropped; those calls return false.
    fn adopt(&self, child: &ConfigNode) -> bool {
        let (key, append) = {
            let data = child.inner.borrow();
            (data.key.clone(), data.append)
        };
        let Some(key) = key else {
            return false;
        };

        let mut replaced_content = None;
        let mut displaced = None;
        let mut final_index = None;
        {
            let mut guard = self.inner.borrow_mut();
            let data = &mut *guard;
            match &key {
                NodeKey::Name(name) => {
                    match data.content {
                        NodeContent::Map(_) => {}
                        NodeContent::List(_) => return false,
                        NodeContent::Absent | NodeContent::Scalar(_) => {
                            replaced_content = Some(mem::replace(
                                &mut data.content,
                                NodeContent::Map(IndexMap::new()),
                            ));
                        }
                    }
                    if let NodeContent::Map(entries) = &mut data.content {
                        displaced = entries.insert(name.clone(), child.clone());
                        if data.options.sort_keys {
                            entries.sort_keys();
                        }
                    }
                }
                NodeKey::Index(index) => {
                    match data.content {
                        NodeContent::List(_) => {}
                        NodeContent::Map(_) => return false,
                        NodeContent::Absent | NodeContent::Scalar(_) => {
                            replaced_content =
                                Some(mem::replace(&mut data.content, NodeContent::List(Vec::new())));
                        }
                    }
                    if let NodeContent::List(items) = &mut data.content {
                        let index = if append { items.len() } else { *index };
                        while items.len() < index {
                            items.push(Self::from_data(NodeData {
                                key: Some(NodeKey::Index(items.len())),
                                parent: ParentLink::Attached(Rc::downgrade(&self.inner)),
                                append: false,
                                comment: None,
                                content: NodeContent::Absent,
                                options: data.options.clone(),
                            }));
                        }
                        if index < items.len() {
                            displaced = Some(mem::replace(&mut items[index], child.clone()));
                        } else {
                            items.push(child.clone());
                        }
                        final_index = Some(index);
                    }
                }
            }
        }

        if let Some(index) = final_index {
            child.inner.borrow_mut().key = Some(NodeKey::Index(index));
        }
        if let Some(old) = replaced_content {
            self.orphan_children(old);
        }
        if let Some(previous) = displaced.filter(|previous| !previous.same_node(child)) {
            child.take_over(&previous);
            previous.inner.borrow_mut().parent = ParentLink::Pending(self.inner.clone());
        }
        true
    }

    /// Move `previous`'s content and comment into this node if it has none.
    fn take_over(&self, previous: &ConfigNode) {
        let mut prev = previous.inner.borrow_mut();
        let mut this = self.inner.borrow_mut();
        if matches!(this.content, NodeContent::Absent) {
            this.content = mem::replace(&mut prev.content, NodeContent::Absent);
            let weak = Rc::downgrade(&self.inner);
            match &this.content {
                NodeContent::List(items) => {
                    for item in items {
                        item.inner.borrow_mut().parent = ParentLink::Attached(weak.clone());
                    }
                }
                NodeContent::Map(entries) => {
                    for child in entries.values() {
                        child.inner.borrow_mut().parent = ParentLink::Attached(weak.clone());
                    }
                }
                NodeContent::Absent | NodeContent::Scalar(_) => {}
            }
        }
        if this.comment.is_none() {
            this.comment = prev.comment.take();
        }
    }

    /// Remove the child at `key` from this node's content and make it virtual.
    fn take_child(&self, key: &NodeKey) -> Option<ConfigNode> {
        let removed = {
            let mut data = self.inner.borrow_mut();
            let removed = match (&mut data.content, key) {
                (NodeContent::Map(entries), NodeKey::Name(name)) => entries.shift_remove(name),
                (NodeContent::List(items), NodeKey::Index(index)) if *index < items.len() => {
                    let removed = items.remove(*index);
                    for (position, item) in items.iter().enumerate().skip(*index) {
                        item.inner.borrow_mut().key = Some(NodeKey::Index(position));
                    }
                    Some(removed)
                }
                _ => None,
            };
            removed
        }?;
        removed.inner.borrow_mut().parent = ParentLink::Pending(self.inner.clone());
        Some(removed)
    }

    /// Remove this node from its parent's content, if attached.
    fn detach(&self) {
        let (parent, key) = {
            let data = self.inner.borrow();
            match &data.parent {
                ParentLink::Attached(parent) => (parent.upgrade(), data.key.clone()),
                ParentLink::Root | ParentLink::Pending(_) => (None, None),
            }
        };
        if let (Some(parent), Some(key)) = (parent, key) {
            let parent = Self::from_ref(parent);
            if parent
                .lookup(&key)
                .is_some_and(|current| current.same_node(self))
            {
                parent.take_child(&key);
            }
        }
    }

    fn replace_content(&self, content: NodeContent) {
        let old = mem::replace(&mut self.inner.borrow_mut().content, content);
        self.orphan_children(old);
    }

    /// Children dropped from this node's content become virtual children of it.
    fn orphan_children(&self, old: NodeContent) {
        for child in old.into_children() {
            child.inner.borrow_mut().parent = ParentLink::Pending(self.inner.clone());
        }
    }

    pub(crate) fn build_content(&self, value: Value) -> NodeContent {
        match value {
            Value::Null => NodeContent::Absent,
            Value::Scalar(scalar) => NodeContent::Scalar(scalar),
            Value::List(items) => NodeContent::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| self.build_child(NodeKey::Index(index), item))
                    .collect(),
            ),
            Value::Map(entries) => {
                let mut children: IndexMap<String, ConfigNode> = entries
                    .into_iter()
                    .map(|(key, item)| {
                        let child = self.build_child(NodeKey::Name(key.clone()), item);
                        (key, child)
                    })
                    .collect();
                self.sort_if_requested(&mut children);
                NodeContent::Map(children)
            }
        }
    }

    fn build_child(&self, key: NodeKey, value: Value) -> ConfigNode {
        let child = self.attached_child(key);
        let content = child.build_content(value);
        child.inner.borrow_mut().content = content;
        child
    }

    /// Deep copy of this node's content, parented to `target`.
    pub(crate) fn copy_content_into(&self, target: &ConfigNode) -> NodeContent {
        match &self.inner.borrow().content {
            NodeContent::Absent => NodeContent::Absent,
            NodeContent::Scalar(scalar) => NodeContent::Scalar(scalar.clone()),
            NodeContent::List(items) => NodeContent::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| item.copy_under(target, NodeKey::Index(index)))
                    .collect(),
            ),
            NodeContent::Map(entries) => {
                let mut children: IndexMap<String, ConfigNode> = entries
                    .iter()
                    .map(|(key, item)| {
                        (key.clone(), item.copy_under(target, NodeKey::Name(key.clone())))
                    })
                    .collect();
                target.sort_if_requested(&mut children);
                NodeContent::Map(children)
            }
        }
    }

    /// Deep copy of this node as an attached child of `parent`.
    pub(crate) fn copy_under(&self, parent: &ConfigNode, key: NodeKey) -> ConfigNode {
        let copy = parent.attached_child(key);
        let content = self.copy_content_into(&copy);
        let comment = self.comment();
        {
            let mut data = copy.inner.borrow_mut();
            data.content = content;
            data.comment = comment;
        }
        copy
    }

    /// Replace this node's content with a deep copy of `source`, keeping
    /// this node attached where it is.
    pub(crate) fn replace_with_copy_of(&self, source: &ConfigNode) {
        let content = source.copy_content_into(self);
        self.attach();
        self.replace_content(content);
    }

    /// Append deep copies of `source`'s list elements to this list.
    pub(crate) fn append_copies_of(&self, source: &ConfigNode) {
        let additions = source.list_children();
        let start = match &self.inner.borrow().content {
            NodeContent::List(items) => items.len(),
            _ => return,
        };
        let copies: Vec<ConfigNode> = additions
            .iter()
            .enumerate()
            .map(|(offset, item)| item.copy_under(self, NodeKey::Index(start + offset)))
            .collect();
        if let NodeContent::List(items) = &mut self.inner.borrow_mut().content {
            items.extend(copies);
        }
    }

    fn sort_if_requested(&self, entries: &mut IndexMap<String, ConfigNode>) {
        if self.inner.borrow().options.sort_keys {
            entries.sort_keys();
        }
    }
}

impl PartialEq for ConfigNode {
    fn eq(&self, other: &Self) -> bool {
        if self.same_node(other) {
            return true;
        }
        let this = self.inner.borrow();
        let that = other.inner.borrow();
        match (&this.content, &that.content) {
            (NodeContent::Absent, NodeContent::Absent) => true,
            (NodeContent::Scalar(a), NodeContent::Scalar(b)) => a == b,
            (NodeContent::List(a), NodeContent::List(b)) => a == b,
            (NodeContent::Map(a), NodeContent::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, child)| b.get(key).is_some_and(|other| child == other))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("ConfigNode")
            .field("key", &data.key)
            .field("virtual", &matches!(data.parent, ParentLink::Pending(_)))
            .field("comment", &data.comment)
            .field("value", &self.get_value())
            .finish()
    }
}
