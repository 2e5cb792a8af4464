//! Additive merging of one tree into another.
//!
//! Merging fills gaps in the destination from the source without
//! overwriting what is already there:
//!
//! | destination | source | result |
//! |---|---|---|
//! | any | absent | unchanged |
//! | absent | any | deep copy of source |
//! | mapping | mapping | key-by-key merge, missing keys copied |
//! | list | list | source items appended after destination items |
//! | scalar | scalar | destination kept |
//! | scalar | mapping or list | replaced by a copy of source |
//! | mapping or list | other kind | destination kept |
//!
//! A missing destination comment is taken from the source, even when the
//! source is absent and carries only a comment.

use crate::node::{ConfigNode, NodeKind};

impl ConfigNode {
    /// Merge `other`'s values into this node.
    ///
    /// The source is only read; everything copied into this tree is a fresh
    /// node. Merging a node into itself does nothing.
    pub fn merge_values_from(&self, other: &ConfigNode) -> &Self {
        if self.same_node(other) {
            return self;
        }

        match (self.kind(), other.kind()) {
            (_, NodeKind::Absent) => {}
            (NodeKind::Absent, _) => self.replace_with_copy_of(other),
            (NodeKind::Map, NodeKind::Map) => {
                for (key, child) in other.map_children() {
                    self.get_child(key).merge_values_from(&child);
                }
            }
            (NodeKind::List, NodeKind::List) => self.append_copies_of(other),
            (NodeKind::Scalar, NodeKind::Map | NodeKind::List) => self.replace_with_copy_of(other),
            (NodeKind::Scalar, NodeKind::Scalar) | (NodeKind::Map | NodeKind::List, _) => {}
        }

        if let Some(comment) = other.comment() {
            self.set_comment_if_absent(comment);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::node::ConfigNode;
    use crate::value::Value;
    use indexmap::IndexMap;

    fn map(entries: Vec<(&str, Value)>) -> Value {
        entries.into_iter().collect()
    }

    fn node(value: Value) -> ConfigNode {
        let root = ConfigNode::root();
        root.set_value(value);
        root
    }

    fn sample() -> ConfigNode {
        let root = node(map(vec![
            ("name", Value::from("app")),
            (
                "server",
                map(vec![("host", Value::from("localhost")), ("port", Value::from(80))]),
            ),
            ("tags", Value::from(vec!["a", "b"])),
            ("empty", Value::Map(IndexMap::new())),
        ]));
        root.get_child("server").set_comment("Server settings");
        root
    }

    #[test]
    fn test_merge_into_empty_copies_everything() {
        let source = sample();
        let destination = ConfigNode::root();
        destination.merge_values_from(&source);

        assert_eq!(destination, source);
        assert_eq!(
            destination.get_child("server").comment().as_deref(),
            Some("Server settings")
        );
        assert!(destination.get_child("empty").is_map());

        // Copies, not aliases
        source.get_node(["server", "host"]).set_value("example.org");
        assert_eq!(
            destination.get_node(["server", "host"]).get_string().as_deref(),
            Some("localhost")
        );
    }

    #[test]
    fn test_merge_from_empty_is_noop() {
        let destination = sample();
        let before = destination.copy();

        destination.merge_values_from(&ConfigNode::root());
        assert_eq!(destination, before);

        destination.merge_values_from(&node(Value::Map(IndexMap::new())));
        assert_eq!(destination, before);
    }

    #[test]
    fn test_merge_keeps_existing_scalars() {
        let destination = node(map(vec![(
            "server",
            map(vec![("port", Value::from(8080))]),
        )]));
        destination.merge_values_from(&sample());

        assert_eq!(destination.get_node(["server", "port"]).get_i64(), Some(8080));
        assert_eq!(
            destination.get_node(["server", "host"]).get_string().as_deref(),
            Some("localhost")
        );
        assert_eq!(destination.get_child("name").get_string().as_deref(), Some("app"));
    }

    #[test]
    fn test_merge_appends_lists() {
        let destination = node(map(vec![("tags", Value::from(vec!["z"]))]));
        destination.merge_values_from(&sample());

        assert_eq!(
            destination.get_child("tags").get_value(),
            Value::from(vec!["z", "a", "b"])
        );
        assert_eq!(
            destination.get_node(["tags"]).list_children()[2].key(),
            Some(crate::NodeKey::Index(2))
        );
    }

    #[test]
    fn test_merge_lists_of_maps() {
        let destination = node(Value::List(vec![map(vec![("id", Value::from(1))])]));
        let source = node(Value::List(vec![map(vec![("id", Value::from(2))])]));
        destination.merge_values_from(&source);

        assert_eq!(
            destination.get_value(),
            Value::List(vec![
                map(vec![("id", Value::from(1))]),
                map(vec![("id", Value::from(2))]),
            ])
        );
    }

    #[test]
    fn test_merge_scalar_replaced_by_container() {
        let destination = node(map(vec![("server", Value::from("off"))]));
        destination.merge_values_from(&sample());

        assert!(destination.get_child("server").is_map());
        assert_eq!(destination.get_node(["server", "port"]).get_i64(), Some(80));
    }

    #[test]
    fn test_merge_container_not_replaced_by_scalar() {
        let destination = node(map(vec![("name", map(vec![("first", Value::from("x"))]))]));
        destination.merge_values_from(&sample());

        assert!(destination.get_child("name").is_map());
    }

    #[test]
    fn test_merge_keeps_destination_comment() {
        let destination = ConfigNode::root();
        destination.get_child("server").set_comment("Mine");
        destination.merge_values_from(&sample());

        assert_eq!(destination.get_child("server").comment().as_deref(), Some("Mine"));
        assert_eq!(destination.get_node(["server", "port"]).get_i64(), Some(80));
    }

    #[test]
    fn test_merge_into_virtual_node_attaches() {
        let root = ConfigNode::root();
        let section = root.get_node(["defaults", "server"]);
        section.merge_values_from(&sample().get_child("server"));

        assert!(root.exists(["defaults", "server", "host"]));
        assert!(!section.is_virtual());
    }

    #[test]
    fn test_merge_absent_source_does_not_attach() {
        let root = ConfigNode::root();
        root.get_child("missing")
            .merge_values_from(&ConfigNode::root());
        assert!(!root.exists(["missing"]));
    }

    #[test]
    fn test_merge_copies_comment_of_absent_source() {
        let source = ConfigNode::root();
        source.get_child("note").set_comment("Fill me in");
        let destination = ConfigNode::root();
        destination.get_child("name").set_value("app");

        destination.merge_values_from(&source);

        let note = destination.get_child("note");
        assert!(!note.is_virtual());
        assert!(note.is_absent());
        assert_eq!(note.comment().as_deref(), Some("Fill me in"));
    }

    #[test]
    fn test_merge_into_self_is_noop() {
        let root = sample();
        let before = root.copy();
        root.merge_values_from(&root.clone());
        assert_eq!(root, before);
    }
}
