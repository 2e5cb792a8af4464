//! Loading and saving YAML files through `ConfigLoader`.

use configtree_core::{ConfigLoader, ConfigOptions};
use configtree_yaml::YamlFormat;
use std::fs;

const EXAMPLE: &str = "\
# Test node
test:
  op-level: unicorn
other:
  op-level: dragon
  location: dog park
";

#[test]
fn test_simple_loading() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("example.yaml");
    let sink = dir.path().join("roundtrip.yaml");
    fs::write(&source, EXAMPLE).unwrap();

    let loader = ConfigLoader::new(YamlFormat)
        .with_source(&source)
        .with_sink(&sink);
    let root = loader.load().unwrap();

    assert_eq!(
        root.get_node(["test", "op-level"]).get_string().as_deref(),
        Some("unicorn")
    );
    assert_eq!(
        root.get_node(["other", "op-level"]).get_string().as_deref(),
        Some("dragon")
    );
    assert_eq!(
        root.get_node(["other", "location"]).get_string().as_deref(),
        Some("dog park")
    );
    assert_eq!(root.get_child("test").comment().as_deref(), Some("Test node"));

    loader.save(&root).unwrap();
    assert_eq!(fs::read_to_string(&sink).unwrap(), EXAMPLE);
}

#[test]
fn test_header_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header.yaml");
    let loader = ConfigLoader::new(YamlFormat)
        .with_path(&path)
        .with_options(
            ConfigOptions::default().with_header("Hi! I am a header!\nLook at meeeeeee!!!"),
        );

    let root = loader.create_empty_node();
    root.get_child("node")
        .set_comment("I have a comment")
        .get_child("party")
        .set_value("now");
    loader.save(&root).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(written, @r"
# Hi! I am a header!
# Look at meeeeeee!!!

# I have a comment
node:
  party: now
");

    // The header survives a load with a loader that sets none
    let reloaded = ConfigLoader::new(YamlFormat).with_path(&path).load().unwrap();
    assert_eq!(
        reloaded.options().header.as_deref(),
        Some("Hi! I am a header!\nLook at meeeeeee!!!")
    );
    assert_eq!(
        reloaded.get_child("node").comment().as_deref(),
        Some("I have a comment")
    );
    assert_eq!(
        ConfigLoader::new(YamlFormat).save_to_string(&reloaded).unwrap(),
        written
    );
}

#[test]
fn test_booleans_not_shared() {
    let loader = ConfigLoader::new(YamlFormat);
    let root = loader.create_empty_node();
    root.get_node(["test", "third"]).set_value(false).set_comment("really?");
    root.get_node(["test", "apple"]).set_comment("fruit").set_value(false);
    root.get_node(["test", "donut"]).set_value(true).set_comment("tasty");
    root.get_node(["test", "guacamole"]).set_value(true).set_comment("and chips?");

    insta::assert_snapshot!(loader.save_to_string(&root).unwrap(), @r"
test:
  # really?
  third: false
  # fruit
  apple: false
  # tasty
  donut: true
  # and chips?
  guacamole: true
");
}

#[test]
fn test_comments_round_trip() {
    const COMMENTED: &str = "\
# Connection settings
server:
  # Listen port
  port: 8080
  host: localhost
# Features
# (experimental)
features:
  - fast
";
    let loader = ConfigLoader::new(YamlFormat);
    let root = loader.load_str(COMMENTED).unwrap();

    assert_eq!(root.options().header, None);
    assert_eq!(
        root.get_node(["server", "port"]).comment().as_deref(),
        Some("Listen port")
    );
    assert_eq!(
        root.get_child("features").comment().as_deref(),
        Some("Features\n(experimental)")
    );
    assert_eq!(loader.save_to_string(&root).unwrap(), COMMENTED);
}

#[test]
fn test_roundtrip_and_merge_empty() {
    const EMPTY_VALUES: &str = "\
empty-list: []
empty-map: {}
nested:
  inner: {}
";
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("empty-values.yaml");
    let output = dir.path().join("load-merge-empty.yaml");
    fs::write(&source_path, EMPTY_VALUES).unwrap();

    let loader = ConfigLoader::new(YamlFormat)
        .with_source(&source_path)
        .with_sink(&output);
    let source = loader.load().unwrap();
    let destination = loader.create_empty_node();
    destination.merge_values_from(&source);

    loader.save(&source).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), EMPTY_VALUES);
    loader.save(&destination).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), EMPTY_VALUES);
}

#[test]
fn test_create_empty_section() {
    let loader = ConfigLoader::new(YamlFormat);
    let root = loader.create_empty_node();
    root.get_node(["section", "aliases"])
        .set_value(configtree_core::Value::Map(Default::default()));

    assert_eq!(
        loader.save_to_string(&root).unwrap(),
        "section:\n  aliases: {}\n"
    );
}

#[test]
fn test_sorted_keys_roundtrip() {
    let loader = ConfigLoader::new(YamlFormat)
        .with_options(ConfigOptions::default().with_sort_keys(true));
    let root = loader.load_str("zebra: 1\napple:\n  y: 2\n  x: 1\n").unwrap();

    assert_eq!(
        loader.save_to_string(&root).unwrap(),
        "apple:\n  x: 1\n  y: 2\nzebra: 1\n"
    );
}

#[test]
fn test_mixed_document_roundtrip() {
    const MIXED: &str = "\
name: \"quoted: value\"
ratio: 0.25
count: -3
servers:
  - host: alpha
    ports:
      - 80
      - 443
  - host: beta
    ports: []
matrix:
  - - 1
    - 2
limits:
  max: .inf
";
    let loader = ConfigLoader::new(YamlFormat);
    let root = loader.load_str(MIXED).unwrap();

    assert_eq!(root.get_node(["servers"]).list_children().len(), 2);
    assert_eq!(
        root.get_child("servers").get_child(0usize).get_child("ports").get_child(1usize).get_i64(),
        Some(443)
    );
    assert_eq!(root.get_node(["limits", "max"]).get_f64(), Some(f64::INFINITY));
    assert_eq!(loader.save_to_string(&root).unwrap(), MIXED);
}

#[test]
fn test_invalid_input_reports_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "key: [unclosed\n").unwrap();

    let err = ConfigLoader::new(YamlFormat).with_path(&path).load().unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse yaml input"), "{}", err);
}
