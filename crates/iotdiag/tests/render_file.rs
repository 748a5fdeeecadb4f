//! File rendering tests
//!
//! Tests that need Graphviz return early when the `dot` executable is not
//! installed; the failure paths are exercised without it.

use std::fs;

use iotdiag::prelude::*;
use iotdiag::{render, GraphvizCommand};
use tempfile::tempdir;

fn dot_available() -> bool {
    let available = GraphvizCommand::new(LayoutEngine::Dot).is_available();
    if !available {
        eprintln!("Skipping: Graphviz 'dot' not found on PATH");
    }
    available
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_render_builtin_png() {
    if !dot_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let catalog = Catalog::builtin();
    for diagram in catalog.iter() {
        let graph = diagram.build().unwrap();
        let path = render(&graph, dir.path().join(diagram.default_stem()), OutputFormat::Png)
            .unwrap();
        assert_eq!(path, dir.path().join(format!("{}.png", diagram.default_stem())));

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "not a PNG: {}", path.display());
    }
    // Cleanup is on by default: only the two images remain.
    assert_eq!(
        entries(dir.path()),
        vec!["iot_activity_diagram.png", "iot_sequence_diagram.png"]
    );
}

#[test]
fn test_keep_source_when_cleanup_disabled() {
    if !dot_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let stem = dir.path().join("iot_sequence_diagram");
    let options = RenderOptions {
        cleanup: false,
        ..RenderOptions::default()
    };
    let graph = Catalog::builtin().build("sequence").unwrap();
    GraphvizRenderer::with_options(options)
        .render_to_path(&graph, &stem)
        .unwrap();

    let kept = fs::read_to_string(&stem).unwrap();
    assert_eq!(kept, iotdiag::source(&graph).unwrap());
    assert!(dir.path().join("iot_sequence_diagram.png").exists());
}

#[test]
fn test_svg_render_is_repeatable_and_contains_labels() {
    if !dot_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let graph = Catalog::builtin().build("sequence").unwrap();
    let first = render(&graph, dir.path().join("a"), OutputFormat::Svg).unwrap();
    let second = render(&graph, dir.path().join("b"), OutputFormat::Svg).unwrap();

    let first = fs::read_to_string(first).unwrap();
    let second = fs::read_to_string(second).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("HTTP/MQTT"));
    assert_eq!(first.matches("class=\"edge\"").count(), 11);
    assert_eq!(first.matches("class=\"node\"").count(), 6);
}

#[test]
fn test_pipe_returns_image_bytes() {
    if !dot_available() {
        return;
    }
    let graph = Catalog::builtin().build("activity").unwrap();
    let renderer = GraphvizRenderer::with_options(RenderOptions::with_format(OutputFormat::Svg));
    let bytes = renderer.pipe(&graph).unwrap();
    let svg = String::from_utf8(bytes).unwrap();
    assert_eq!(svg.matches("class=\"node\"").count(), 9);
    assert_eq!(svg.matches("class=\"edge\"").count(), 8);
}

#[test]
fn test_dangling_edge_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut graph = Catalog::builtin().build("activity").unwrap();
    graph.edge("end", "afterlife").unwrap();

    let options = RenderOptions {
        cleanup: false,
        ..RenderOptions::default()
    };
    let err = GraphvizRenderer::with_options(options)
        .render_to_path(&graph, dir.path().join("iot_activity_diagram"))
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let graph = Catalog::builtin().build("activity").unwrap();
    let err = render(&graph, dir.path().join("missing").join("out"), OutputFormat::Png)
        .unwrap_err();
    assert!(err.is_io());
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_missing_engine_is_render_error_and_leaves_no_file() {
    let dir = tempdir().unwrap();
    let graph = Catalog::builtin().build("activity").unwrap();
    let renderer = GraphvizRenderer::new().with_command(GraphvizCommand::with_program(
        LayoutEngine::Dot,
        "/nonexistent/iotdiag-dot",
    ));
    let err = renderer
        .render_to_path(&graph, dir.path().join("iot_activity_diagram"))
        .unwrap_err();
    assert!(err.is_render());
    // The staging file is removed when the render fails.
    assert!(entries(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_is_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions.
    if tempfile::tempfile_in(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let graph = Catalog::builtin().build("sequence").unwrap();
    let err = render(&graph, locked.join("out"), OutputFormat::Png).unwrap_err();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(err.is_io());
    assert!(entries(&locked).is_empty());
}

#[test]
fn test_keep_source_from_loaded_description() {
    if !dot_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let input = dir.path().join("blink.json");
    let description = r#"{"name": "blink", "nodes": [{"id": "led", "shape": "circle"}, {"id": "board"}],
        "edges": [{"from": "board", "to": "led", "label": "GPIO"}]}"#;
    fs::write(&input, description).unwrap();

    let graph = iotdiag::load(&input).unwrap();
    let options = RenderOptions {
        cleanup: false,
        ..RenderOptions::with_format(OutputFormat::Svg)
    };
    let stem = dir.path().join("blink");
    let path = GraphvizRenderer::with_options(options)
        .render_to_path(&graph, &stem)
        .unwrap();

    assert_eq!(path, dir.path().join("blink.svg"));
    assert_eq!(fs::read_to_string(&input).unwrap(), description);
    assert_eq!(fs::read_to_string(&stem).unwrap(), iotdiag::source(&graph).unwrap());
    assert_eq!(entries(dir.path()), vec!["blink", "blink.json", "blink.svg"]);
}
