//! Core type definitions for diagram rendering
//!
//! This module contains the fundamental types used throughout iotdiag:
//! node shapes, layout direction, output formats, layout engines, and the
//! node/edge data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Node shapes, named after their Graphviz `shape` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// Plain box: `shape=box`
    #[default]
    Box,
    /// Rectangle: `shape=rect` (drawn like a box)
    Rect,
    /// Circle: `shape=circle`
    Circle,
    /// Two concentric circles: `shape=doublecircle`
    DoubleCircle,
    /// Ellipse: `shape=ellipse`
    Ellipse,
    /// Diamond (decision): `shape=diamond`
    Diamond,
    /// Cylinder (storage): `shape=cylinder`
    Cylinder,
    /// Note with folded corner: `shape=note`
    Note,
    /// Label only, no outline: `shape=plaintext`
    Plaintext,
}

impl NodeShape {
    /// All shapes, in declaration order
    pub const ALL: [NodeShape; 9] = [
        NodeShape::Box,
        NodeShape::Rect,
        NodeShape::Circle,
        NodeShape::DoubleCircle,
        NodeShape::Ellipse,
        NodeShape::Diamond,
        NodeShape::Cylinder,
        NodeShape::Note,
        NodeShape::Plaintext,
    ];

    /// The Graphviz attribute value for this shape
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Rect => "rect",
            NodeShape::Circle => "circle",
            NodeShape::DoubleCircle => "doublecircle",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Diamond => "diamond",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Note => "note",
            NodeShape::Plaintext => "plaintext",
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeShape {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        NodeShape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == lowered)
            .ok_or_else(|| DiagramError::configuration_error(format!("Unknown node shape: {}", s)))
    }
}

/// Layout direction (Graphviz `rankdir`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom (TB, also accepted as TD)
    #[default]
    #[serde(rename = "TB", alias = "TD")]
    TopBottom,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomTop,
}

impl Direction {
    /// Returns true if ranks are laid out vertically (TB or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopBottom | Direction::BottomTop)
    }

    /// The `rankdir` value for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::BottomTop => "BT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopBottom),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomTop),
            _ => Err(DiagramError::configuration_error(format!(
                "Unknown direction: {}",
                s
            ))),
        }
    }
}

/// Image formats the layout engine is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
    Gif,
    /// Laid-out DOT with position attributes (`-Tdot`)
    Dot,
}

impl OutputFormat {
    /// The value passed to the engine as `-T<format>`
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Gif => "gif",
            OutputFormat::Dot => "dot",
        }
    }

    /// File extension appended to the output stem
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "gv",
            other => other.as_str(),
        }
    }

    /// Returns true if the output is text rather than binary image data
    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Dot)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "gif" => Ok(OutputFormat::Gif),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            _ => Err(DiagramError::configuration_error(format!(
                "Unknown output format: {}",
                s
            ))),
        }
    }
}

/// Graphviz layout programs; the name is also the executable name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LayoutEngine {
    /// Hierarchical layout, the right choice for flows
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
    Osage,
    Patchwork,
}

impl LayoutEngine {
    /// Executable name of the engine
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Fdp => "fdp",
            LayoutEngine::Sfdp => "sfdp",
            LayoutEngine::Circo => "circo",
            LayoutEngine::Twopi => "twopi",
            LayoutEngine::Osage => "osage",
            LayoutEngine::Patchwork => "patchwork",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutEngine {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(LayoutEngine::Dot),
            "neato" => Ok(LayoutEngine::Neato),
            "fdp" => Ok(LayoutEngine::Fdp),
            "sfdp" => Ok(LayoutEngine::Sfdp),
            "circo" => Ok(LayoutEngine::Circo),
            "twopi" => Ok(LayoutEngine::Twopi),
            "osage" => Ok(LayoutEngine::Osage),
            "patchwork" => Ok(LayoutEngine::Patchwork),
            _ => Err(DiagramError::configuration_error(format!(
                "Unknown layout engine: {}",
                s
            ))),
        }
    }
}

/// A node in the diagram with all its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Unique identifier for the node
    pub id: String,
    /// Display label (may differ from id)
    pub label: String,
    /// Visual shape of the node
    pub shape: NodeShape,
}

impl NodeData {
    /// Create a new node with the default box shape
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape: NodeShape::Box,
        }
    }

    /// Create a new node with a specific shape
    pub fn with_shape(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape,
        }
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    /// Optional label drawn next to the arrow
    pub label: Option<String>,
}

impl EdgeData {
    /// Create a new unlabeled edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Create a new edge with a label
    pub fn with_label(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
        }
    }
}

/// Graph-wide rendering attributes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphAttributes {
    /// Rank direction
    pub direction: Direction,
    /// Maximum drawing size in inches, as Graphviz reads it (`"8"`, `"7.5,10"`)
    pub size: Option<String>,
}
