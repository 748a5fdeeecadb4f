//! Serializable graph descriptions
//!
//! Both built-in diagrams, and any user-supplied diagram, can be written as
//! one JSON document:
//!
//! ```json
//! {
//!   "name": "IoT_Sequence",
//!   "direction": "TB",
//!   "size": "8",
//!   "nodes": [{ "id": "ESP8266", "shape": "rect" }],
//!   "edges": [{ "from": "Sensors", "to": "ESP8266", "label": "readings" }]
//! }
//! ```
//!
//! A node without `label` is labeled with its id; a node without `shape` is a
//! box.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Database, DiagramError, Digraph, Direction, EdgeData, GraphAttributes, NodeData, NodeShape,
    Result,
};

/// One node in a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub shape: NodeShape,
}

/// One edge in a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A complete graph description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDescription {
    pub name: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

impl GraphDescription {
    /// Parse a description from JSON text
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| {
            DiagramError::configuration_error(format!("invalid graph description: {}", e))
        })
    }

    /// Read and parse a description file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DiagramError::io_error(path, e))?;
        let description = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            nodes = description.nodes.len(),
            edges = description.edges.len(),
            "Loaded graph description"
        );
        Ok(description)
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DiagramError::configuration_error(format!("cannot serialize graph description: {}", e))
        })
    }

    /// Build a graph from this description
    ///
    /// The graph is not validated here; dangling edges surface when it is
    /// rendered or explicitly validated.
    pub fn into_graph(self) -> Result<Digraph> {
        let attributes = GraphAttributes {
            direction: self.direction,
            size: self.size,
        };
        let mut graph = Digraph::with_attributes(self.name, attributes);

        for node in self.nodes {
            let label = node.label.unwrap_or_else(|| node.id.clone());
            graph.add_node(NodeData::with_shape(node.id, label, node.shape))?;
        }
        for edge in self.edges {
            graph.add_edge(EdgeData {
                from: edge.from,
                to: edge.to,
                label: edge.label,
            })?;
        }
        Ok(graph)
    }
}

impl Digraph {
    /// Describe this graph in the serializable form
    pub fn to_description(&self) -> GraphDescription {
        GraphDescription {
            name: self.name().to_string(),
            direction: self.direction(),
            size: self.attributes().size.clone(),
            nodes: self
                .nodes()
                .map(|node| NodeDescription {
                    id: node.id.clone(),
                    label: (node.label != node.id).then(|| node.label.clone()),
                    shape: node.shape,
                })
                .collect(),
            edges: self
                .edges()
                .map(|edge| EdgeDescription {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    label: edge.label.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let description = GraphDescription::from_json_str(
            r#"{"name": "g", "nodes": [{"id": "a"}], "edges": []}"#,
        )
        .unwrap();
        assert_eq!(description.direction, Direction::TopBottom);
        assert!(description.size.is_none());

        let graph = description.into_graph().unwrap();
        let node = graph.get_node("a").unwrap();
        assert_eq!(node.label, "a");
        assert_eq!(node.shape, NodeShape::Box);
    }

    #[test]
    fn test_direction_and_shape_names() {
        let description = GraphDescription::from_json_str(
            r#"{"name": "g", "direction": "LR",
                "nodes": [{"id": "s", "label": "Start", "shape": "doublecircle"}]}"#,
        )
        .unwrap();
        assert_eq!(description.direction, Direction::LeftRight);
        assert_eq!(description.nodes[0].shape, NodeShape::DoubleCircle);
    }

    #[test]
    fn test_unknown_shape_is_configuration_error() {
        let err = GraphDescription::from_json_str(
            r#"{"name": "g", "nodes": [{"id": "a", "shape": "hexagon"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = GraphDescription::from_json_str(r#"{"name": "g", "colour": "red"}"#).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_node_field_is_rejected() {
        let err = GraphDescription::from_json_str(
            r#"{"name": "g", "nodes": [{"id": "a", "shpae": "circle"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("shpae"));
    }

    #[test]
    fn test_unknown_edge_field_is_rejected() {
        let err = GraphDescription::from_json_str(
            r#"{"name": "g", "nodes": [{"id": "a"}, {"id": "b"}],
                "edges": [{"from": "a", "to": "b", "lable": "x"}]}"#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("lable"));
    }

    #[test]
    fn test_dangling_edge_survives_loading() {
        let graph = GraphDescription::from_json_str(
            r#"{"name": "g", "nodes": [{"id": "a"}], "edges": [{"from": "a", "to": "b"}]}"#,
        )
        .unwrap()
        .into_graph()
        .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_description_omits_label_equal_to_id() {
        let mut graph = Digraph::new("g");
        graph.node("ESP8266", "ESP8266", NodeShape::Rect).unwrap();
        graph.node("read", "Read sensors", NodeShape::Box).unwrap();
        let description = graph.to_description();
        assert_eq!(description.nodes[0].label, None);
        assert_eq!(description.nodes[1].label.as_deref(), Some("Read sensors"));
    }
}
