//! iotdiag - Render the IoT system diagrams with Graphviz
//!
//! A small library that describes directed graphs (nodes with shapes,
//! optionally labeled edges, layout attributes), turns them into Graphviz DOT
//! source and renders that source to an image with a Graphviz layout engine.
//! It ships the two diagrams of the IoT system: an activity diagram and a
//! sequence diagram.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use iotdiag::{render, Catalog, OutputFormat};
//!
//! let graph = Catalog::builtin().build("sequence").unwrap();
//! let path = render(&graph, "out/iot_sequence_diagram", OutputFormat::Png).unwrap();
//! assert!(path.ends_with("iot_sequence_diagram.png"));
//! ```
//!
//! # Building graphs
//!
//! ```rust
//! use iotdiag::prelude::*;
//!
//! let mut graph = Digraph::new("Blink");
//! graph.node("on", "LED on", NodeShape::Circle).unwrap();
//! graph.node("off", "LED off", NodeShape::Circle).unwrap();
//! graph.labeled_edge("on", "off", "500 ms").unwrap();
//!
//! let dot = iotdiag::source(&graph).unwrap();
//! assert!(dot.contains("\"on\" -> \"off\" [label=\"500 ms\"]"));
//! ```

pub mod core;
pub mod plugins;

use std::path::{Path, PathBuf};

pub use core::*;
pub use plugins::Catalog;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Diagram, DiagramError, Digraph, Direction, DotRenderer, EdgeData,
        GraphDescription, GraphvizRenderer, LayoutEngine, NodeData, NodeShape, OutputFormat,
        RenderOptions, Renderer,
    };
    pub use crate::plugins::{ActivityDiagram, Catalog, SequenceDiagram};
}

/// Render a graph to `<stem>.<format>` with the `dot` engine
///
/// The intermediate DOT source is not kept. Returns the written path.
///
/// # Errors
/// * `ConfigurationError` - an edge references an unknown node; nothing is written
/// * `IoError` - the target directory is missing or not writable
/// * `RenderError` - Graphviz is not installed or fails
pub fn render(graph: &Digraph, stem: impl AsRef<Path>, format: OutputFormat) -> Result<PathBuf> {
    GraphvizRenderer::with_options(RenderOptions::with_format(format)).render_to_path(graph, stem)
}

/// Validate a graph and return its DOT source
///
/// # Example
/// ```rust
/// use iotdiag::{source, Catalog};
///
/// let dot = source(&Catalog::builtin().build("activity").unwrap()).unwrap();
/// assert!(dot.starts_with("digraph \"IoT_Activity\" {"));
/// assert!(dot.contains("rankdir=TB"));
/// ```
pub fn source(graph: &Digraph) -> Result<String> {
    DotRenderer::new().render(graph)
}

/// Load a JSON graph description and build the graph
pub fn load(path: impl AsRef<Path>) -> Result<Digraph> {
    GraphDescription::load(path)?.into_graph()
}
