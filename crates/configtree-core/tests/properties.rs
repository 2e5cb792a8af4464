//! Property tests for tree navigation, writes, traversal and merging.

use configtree_core::{ConfigNode, ConfigVisitor, ContainerKind, NodeKey, Value};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn gen_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // NaN never compares equal, so keep floats finite
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

fn gen_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![1 => Just(Value::Null), 4 => gen_scalar()];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-c]{1,2}", inner), 0..4)
                .prop_map(|entries| entries.into_iter().collect::<Value>()),
        ]
    })
}

fn gen_present_value() -> impl Strategy<Value = Value> {
    gen_value().prop_filter("null detaches instead of writing", |value| !value.is_null())
}

fn gen_key() -> impl Strategy<Value = NodeKey> {
    prop_oneof![
        "[a-c]{1,2}".prop_map(NodeKey::Name),
        (0usize..3).prop_map(NodeKey::Index),
    ]
}

fn gen_path() -> impl Strategy<Value = Vec<NodeKey>> {
    prop::collection::vec(gen_key(), 0..4)
}

// =============================================================================
// Helpers
// =============================================================================

fn tree(value: Value) -> ConfigNode {
    let root = ConfigNode::root();
    root.set_value(value);
    root
}

fn count_nodes(value: &Value) -> usize {
    1 + match value {
        Value::List(items) => items.iter().map(count_nodes).sum(),
        Value::Map(entries) => entries.values().map(count_nodes).sum(),
        Value::Null | Value::Scalar(_) => 0,
    }
}

/// Fails on an exit that does not close the innermost open container.
struct Pairing;

#[derive(Default)]
struct PairingState {
    open: Vec<(ConfigNode, ContainerKind)>,
    entered: usize,
}

impl PairingState {
    fn close(&mut self, node: &ConfigNode, kind: ContainerKind) -> Result<(), String> {
        match self.open.pop() {
            Some((open, open_kind)) if open.same_node(node) && open_kind == kind => Ok(()),
            Some((open, _)) => Err(format!("exit of {:?} while {:?} is open", node.key(), open.key())),
            None => Err(format!("exit of {:?} with nothing open", node.key())),
        }
    }
}

impl ConfigVisitor for Pairing {
    type State = PairingState;
    type Output = usize;
    type Error = String;

    fn new_state(&mut self) -> PairingState {
        PairingState::default()
    }

    fn enter_node(&mut self, _node: &ConfigNode, state: &mut PairingState) -> Result<(), String> {
        state.entered += 1;
        Ok(())
    }

    fn enter_mapping_node(&mut self, node: &ConfigNode, state: &mut PairingState) -> Result<(), String> {
        state.open.push((node.clone(), ContainerKind::Mapping));
        Ok(())
    }

    fn enter_list_node(&mut self, node: &ConfigNode, state: &mut PairingState) -> Result<(), String> {
        state.open.push((node.clone(), ContainerKind::List));
        Ok(())
    }

    fn exit_mapping_node(&mut self, node: &ConfigNode, state: &mut PairingState) -> Result<(), String> {
        state.close(node, ContainerKind::Mapping)
    }

    fn exit_list_node(&mut self, node: &ConfigNode, state: &mut PairingState) -> Result<(), String> {
        state.close(node, ContainerKind::List)
    }

    fn end_visit(&mut self, state: PairingState) -> Result<usize, String> {
        if state.open.is_empty() {
            Ok(state.entered)
        } else {
            Err(format!("{} containers never exited", state.open.len()))
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Navigating and querying any path leaves the tree unchanged
    #[test]
    fn test_reads_never_vivify(value in gen_value(), path in gen_path()) {
        let root = tree(value.clone());
        let existed = root.exists(path.iter().cloned());

        let node = root.get_node(path.iter().cloned());
        let _ = node.get_value();
        let _ = node.comment();
        let _ = root.get_or_create(path.iter().cloned()).is_virtual();

        prop_assert_eq!(root.get_value(), value);
        prop_assert_eq!(root.exists(path.iter().cloned()), existed);
        prop_assert_eq!(node.is_virtual(), !existed);
    }

    /// Writing through a fresh path reads the same value back
    #[test]
    fn test_write_then_read_round_trips(path in gen_path(), value in gen_present_value()) {
        let root = ConfigNode::root();
        root.get_or_create(path.iter().cloned()).set_value(value.clone());

        prop_assert!(root.exists(path.iter().cloned()));
        prop_assert_eq!(root.get_node(path.iter().cloned()).get_value(), value);
    }

    /// A write into an existing tree either lands or changes nothing
    #[test]
    fn test_write_lands_or_leaves_tree(
        existing in gen_value(),
        path in gen_path(),
        value in gen_present_value(),
    ) {
        let root = tree(existing.clone());
        root.get_node(path.iter().cloned()).set_value(value.clone());

        if root.exists(path.iter().cloned()) {
            prop_assert_eq!(root.get_node(path.iter().cloned()).get_value(), value);
        } else {
            prop_assert_eq!(root.get_value(), existing);
        }
    }

    /// Every container is exited exactly once, in nesting order
    #[test]
    fn test_visit_enter_exit_matched(value in gen_value()) {
        let root = tree(value.clone());
        let entered = root.visit(&mut Pairing);
        prop_assert_eq!(entered, Ok(count_nodes(&value)));
    }

    /// Merging into an empty node copies the source exactly
    #[test]
    fn test_merge_into_empty_is_equal(value in gen_value()) {
        let source = tree(value.clone());
        let destination = ConfigNode::root();
        destination.merge_values_from(&source);

        prop_assert_eq!(&destination, &source);
        prop_assert_eq!(destination.get_value(), value);
    }
}
