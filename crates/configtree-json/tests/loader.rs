//! Loading and saving JSON files through `ConfigLoader`.

use configtree_core::{ConfigLoader, ConfigNode, Value};
use configtree_json::JsonFormat;
use std::fs;

const SETTINGS: &str = r#"{
  "server": {
    "host": "localhost",
    "port": 8080
  },
  "features": [
    "search",
    "export"
  ],
  "limits": {},
  "debug": false
}
"#;

#[test]
fn test_load_navigate_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();

    let loader = ConfigLoader::new(JsonFormat::default()).with_path(&path);
    let root = loader.load().unwrap();

    assert_eq!(root.get_node(["server", "port"]).get_i64(), Some(8080));
    assert_eq!(
        root.get_child("features").get_child(1usize).get_string().as_deref(),
        Some("export")
    );
    assert!(root.get_child("limits").is_map());
    assert!(root.get_child("limits").is_empty());

    loader.save(&root).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn test_missing_file_then_populate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");
    let loader = ConfigLoader::new(JsonFormat::compact()).with_path(&path);

    let root = loader.load().unwrap();
    assert!(root.is_absent());

    root.get_node(["window", "size"]).set_value(vec![800, 600]);
    loader.save(&root).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"window":{"size":[800,600]}}"#
    );
}

#[test]
fn test_merge_defaults_into_loaded() {
    let loader = ConfigLoader::new(JsonFormat::compact());
    let user = loader.load_str(r#"{"server": {"port": 9000}, "features": ["beta"]}"#).unwrap();
    let defaults = loader.load_str(SETTINGS).unwrap();

    user.merge_values_from(&defaults);
    assert_eq!(
        loader.save_to_string(&user).unwrap(),
        r#"{"server":{"port":9000,"host":"localhost"},"features":["beta","search","export"],"limits":{},"debug":false}"#
    );
}

#[test]
fn test_roundtrip_and_merge_empty_values() {
    let input = r#"{"empty-list":[],"empty-map":{},"nested":{"inner":{}}}"#;
    let loader = ConfigLoader::new(JsonFormat::compact());

    let source = loader.load_str(input).unwrap();
    let destination = loader.create_empty_node();
    destination.merge_values_from(&source);

    assert_eq!(loader.save_to_string(&source).unwrap(), input);
    assert_eq!(loader.save_to_string(&destination).unwrap(), input);
}

#[test]
fn test_set_node_across_trees() {
    let loader = ConfigLoader::new(JsonFormat::compact());
    let source = loader.load_str(SETTINGS).unwrap();
    let target = ConfigNode::root();

    target.get_child("copied").set_node(&source.get_child("server"));
    source.get_node(["server", "port"]).set_value(1);

    assert_eq!(
        target.get_node(["copied", "port"]).get_value(),
        Value::from(8080)
    );
}
