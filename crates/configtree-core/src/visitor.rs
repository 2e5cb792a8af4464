//! Depth-first visitor traversal.
//!
//! [`ConfigNode::visit`] walks a tree with an explicit stack instead of
//! recursion, so arbitrarily deep trees cannot overflow the call stack. The
//! stack holds two kinds of entries: nodes still to be entered, and
//! [`NodeEnd`] markers that fire the exit callback of a container once all of
//! its children have been popped.
//!
//! # Event order
//!
//! For `{"test": {"op-level": "unicorn"}}` a visitor sees:
//!
//! ```text
//! begin_visit(root)
//! enter_node(root)      enter_mapping_node(root)
//! enter_node(test)      enter_mapping_node(test)
//! enter_node(op-level)  enter_scalar_node(op-level)
//! exit_mapping_node(test)
//! exit_mapping_node(root)
//! end_visit
//! ```
//!
//! # Errors
//!
//! Every callback may fail with the visitor's `Error` type. The first failure
//! stops the walk and is returned unchanged from `visit`; no further callbacks
//! run, including `end_visit`.

use crate::node::{ConfigNode, NodeContent};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Callbacks driven by [`ConfigNode::visit`].
///
/// Only [`ConfigVisitor::new_state`] and [`ConfigVisitor::end_visit`] are
/// required; every other callback defaults to doing nothing.
pub trait ConfigVisitor {
    /// Mutable state threaded through one traversal.
    type State;

    /// Result produced by [`ConfigVisitor::end_visit`].
    type Output;

    /// Failure type of every callback.
    type Error;

    /// Create the initial state for a traversal.
    fn new_state(&mut self) -> Self::State;

    /// Called once with the node the traversal starts from.
    fn begin_visit(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every node when it is first reached, before the
    /// kind-specific callback.
    fn enter_node(&mut self, _node: &ConfigNode, _state: &mut Self::State) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for a mapping before any of its children.
    fn enter_mapping_node(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for a list before any of its elements.
    fn enter_list_node(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for scalar and absent nodes.
    fn enter_scalar_node(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for a mapping after all of its children have been visited.
    fn exit_mapping_node(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for a list after all of its elements have been visited.
    fn exit_list_node(
        &mut self,
        _node: &ConfigNode,
        _state: &mut Self::State,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after the whole tree has been visited.
    fn end_visit(&mut self, state: Self::State) -> Result<Self::Output, Self::Error>;
}

/// Which kind of container a [`NodeEnd`] closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Mapping,
    List,
}

/// Marker for "all children of this container have been visited".
///
/// Two markers are equal when they close the same node; the container kind
/// is informational and does not take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct NodeEnd {
    node: ConfigNode,
    kind: ContainerKind,
}

impl NodeEnd {
    pub fn new(node: ConfigNode, kind: ContainerKind) -> Self {
        NodeEnd { node, kind }
    }

    /// The container this marker closes.
    pub fn node(&self) -> &ConfigNode {
        &self.node
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    fn dispatch<V: ConfigVisitor>(&self, visitor: &mut V, state: &mut V::State) -> Result<(), V::Error> {
        match self.kind {
            ContainerKind::Mapping => visitor.exit_mapping_node(&self.node, state),
            ContainerKind::List => visitor.exit_list_node(&self.node, state),
        }
    }
}

impl PartialEq for NodeEnd {
    fn eq(&self, other: &Self) -> bool {
        self.node.same_node(&other.node)
    }
}

impl Eq for NodeEnd {}

impl Hash for NodeEnd {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.node.inner).hash(state);
    }
}

/// An entry on the traversal stack.
enum VisitItem {
    Node(ConfigNode),
    End(NodeEnd),
}

/// What the driver found when entering a node.
enum Entered {
    Mapping(Vec<ConfigNode>),
    List(Vec<ConfigNode>),
    Terminal,
}

impl ConfigNode {
    /// Visit this node and its descendants with a fresh state.
    pub fn visit<V: ConfigVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        let state = visitor.new_state();
        self.visit_with_state(visitor, state)
    }

    /// Visit this node and its descendants starting from `state`.
    pub fn visit_with_state<V: ConfigVisitor>(
        &self,
        visitor: &mut V,
        mut state: V::State,
    ) -> Result<V::Output, V::Error> {
        visitor.begin_visit(self, &mut state)?;

        let mut stack = vec![VisitItem::Node(self.clone())];
        while let Some(item) = stack.pop() {
            let node = match item {
                VisitItem::End(end) => {
                    end.dispatch(visitor, &mut state)?;
                    continue;
                }
                VisitItem::Node(node) => node,
            };

            visitor.enter_node(&node, &mut state)?;
            // Children are snapshotted here; a visitor that mutates the node
            // from a callback does not disturb this walk.
            match node.entered() {
                Entered::Mapping(children) => {
                    visitor.enter_mapping_node(&node, &mut state)?;
                    stack.push(VisitItem::End(NodeEnd::new(node, ContainerKind::Mapping)));
                    stack.extend(children.into_iter().rev().map(VisitItem::Node));
                }
                Entered::List(children) => {
                    visitor.enter_list_node(&node, &mut state)?;
                    stack.push(VisitItem::End(NodeEnd::new(node, ContainerKind::List)));
                    stack.extend(children.into_iter().rev().map(VisitItem::Node));
                }
                Entered::Terminal => visitor.enter_scalar_node(&node, &mut state)?,
            }
        }

        visitor.end_visit(state)
    }

    fn entered(&self) -> Entered {
        match &self.inner.borrow().content {
            NodeContent::Map(entries) => Entered::Mapping(entries.values().cloned().collect()),
            NodeContent::List(items) => Entered::List(items.clone()),
            NodeContent::Absent | NodeContent::Scalar(_) => Entered::Terminal,
        }
    }
}
