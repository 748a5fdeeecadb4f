//! Directed graph storage
//!
//! [`Digraph`] holds a named graph: nodes with shapes, optionally labeled
//! edges, and the graph-wide attributes. Insertion order is preserved so the
//! generated DOT source is the same every time.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{
    Database, DiagramError, Direction, EdgeData, GraphAttributes, NodeData, NodeShape, Result,
};

/// A named directed graph
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    /// Graph name, written as the DOT graph ID
    name: String,
    /// Rendering attributes
    attributes: GraphAttributes,
    /// Nodes indexed by ID
    nodes: HashMap<String, NodeData>,
    /// Node IDs in insertion order (for deterministic iteration)
    node_order: Vec<String>,
    /// Edges in insertion order
    edges: Vec<EdgeData>,
}

impl Digraph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a new empty graph with the given attributes
    pub fn with_attributes(name: impl Into<String>, attributes: GraphAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            ..Default::default()
        }
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendering attributes
    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    /// Set the rank direction
    pub fn set_direction(&mut self, direction: Direction) {
        self.attributes.direction = direction;
    }

    /// Get the rank direction
    pub fn direction(&self) -> Direction {
        self.attributes.direction
    }

    /// Set the maximum drawing size
    pub fn set_size(&mut self, size: impl Into<String>) {
        self.attributes.size = Some(size.into());
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Add a node with a shape
    pub fn node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        shape: NodeShape,
    ) -> Result<()> {
        self.add_node(NodeData::with_shape(id, label, shape))
    }

    /// Add an unlabeled edge
    pub fn edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> Result<()> {
        self.add_edge(EdgeData::new(from, to))
    }

    /// Add a labeled edge
    pub fn labeled_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<()> {
        self.add_edge(EdgeData::with_label(from, to, label))
    }

    /// Edges whose source or target is not a known node
    pub fn dangling_edges(&self) -> Vec<&EdgeData> {
        self.edges
            .iter()
            .filter(|e| !self.has_node(&e.from) || !self.has_node(&e.to))
            .collect()
    }

    /// Check that every edge references existing nodes
    ///
    /// Reports the first offending edge, in insertion order.
    pub fn validate(&self) -> Result<()> {
        trace!(graph = %self.name, "Validating graph");
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.has_node(endpoint) {
                    debug!(
                        edge_from = %edge.from,
                        edge_to = %edge.to,
                        missing = %endpoint,
                        "Edge references unknown node"
                    );
                    return Err(DiagramError::configuration_error(format!(
                        "edge '{}' -> '{}' in graph '{}' references unknown node '{}'",
                        edge.from, edge.to, self.name, endpoint
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Database for Digraph {
    type Node = NodeData;
    type Edge = EdgeData;

    fn add_node(&mut self, node: NodeData) -> Result<()> {
        trace!(node_id = %node.id, node_label = %node.label, node_shape = %node.shape, "Adding node to graph");
        if !self.nodes.contains_key(&node.id) {
            self.node_order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
        debug!(node_count = self.node_count(), "Node added");
        Ok(())
    }

    fn add_edge(&mut self, edge: EdgeData) -> Result<()> {
        trace!(
            edge_from = %edge.from,
            edge_to = %edge.to,
            edge_label = ?edge.label,
            "Adding edge to graph"
        );
        self.edges.push(edge);
        debug!(edge_count = self.edge_count(), "Edge added");
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.node_order.clear();
        self.edges.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
