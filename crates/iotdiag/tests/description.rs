//! Tests for the JSON graph description format

use iotdiag::prelude::*;
use tempfile::tempdir;

const BLINK: &str = r#"{
  "name": "Blink",
  "direction": "LR",
  "size": "4,2",
  "nodes": [
    { "id": "on", "label": "LED bật", "shape": "circle" },
    { "id": "off", "label": "LED tắt", "shape": "circle" }
  ],
  "edges": [
    { "from": "on", "to": "off", "label": "500 ms" },
    { "from": "off", "to": "on" }
  ]
}"#;

#[test]
fn test_load_and_build() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blink.json");
    std::fs::write(&path, BLINK).unwrap();

    let graph = iotdiag::load(&path).unwrap();
    assert_eq!(graph.name(), "Blink");
    assert_eq!(graph.direction(), Direction::LeftRight);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);

    let dot = iotdiag::source(&graph).unwrap();
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("size=\"4,2\""));
    assert!(dot.contains("\"on\" [label=\"LED bật\" shape=circle]"));
    assert!(dot.contains("\"on\" -> \"off\" [label=\"500 ms\"]"));
    assert!(dot.contains("\"off\" -> \"on\"\n"));
}

#[test]
fn test_pretty_json_round_trip() {
    let description = GraphDescription::from_json_str(BLINK).unwrap();
    let text = description.to_json_pretty().unwrap();
    assert_eq!(GraphDescription::from_json_str(&text).unwrap(), description);
}

#[test]
fn test_builtin_export_shape() {
    let description = Catalog::builtin().build("activity").unwrap().to_description();
    let value: serde_json::Value =
        serde_json::from_str(&description.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["name"], "IoT_Activity");
    assert_eq!(value["direction"], "TB");
    assert_eq!(value["size"], "8");
    assert_eq!(value["nodes"].as_array().unwrap().len(), 9);
    assert_eq!(value["nodes"][8]["shape"], "doublecircle");
    assert!(value["edges"][0].get("label").is_none());
}

#[test]
fn test_malformed_json_is_configuration_error() {
    let err = GraphDescription::from_json_str("{ not json").unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("invalid graph description"));
}

#[test]
fn test_missing_name_is_rejected() {
    let err = GraphDescription::from_json_str(r#"{"nodes": []}"#).unwrap_err();
    assert!(err.is_configuration());
}
