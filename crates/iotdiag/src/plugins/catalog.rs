//! Registry of named diagrams
//!
//! The catalog keeps diagrams in registration order and resolves them by
//! name, so callers can render "activity" or "sequence" without knowing the
//! concrete types.

use tracing::{debug, info, span, warn, Level};

use crate::core::{Diagram, DiagramError, Digraph, Result};
use crate::plugins::{ActivityDiagram, SequenceDiagram};

/// Ordered registry of diagrams
pub struct Catalog {
    diagrams: Vec<Box<dyn Diagram>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            diagrams: Vec::new(),
        }
    }

    /// Create a catalog holding the built-in diagrams
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(Box::new(ActivityDiagram::new()));
        catalog.register(Box::new(SequenceDiagram::new()));
        catalog
    }

    /// Register a diagram; a diagram with the same name is replaced
    pub fn register(&mut self, diagram: Box<dyn Diagram>) {
        debug!(diagram = diagram.name(), "Registering diagram");
        match self.diagrams.iter().position(|d| d.name() == diagram.name()) {
            Some(index) => self.diagrams[index] = diagram,
            None => self.diagrams.push(diagram),
        }
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.diagrams.iter().map(|d| d.name()).collect()
    }

    /// Iterate over registered diagrams
    pub fn iter(&self) -> impl Iterator<Item = &dyn Diagram> {
        self.diagrams.iter().map(|d| d.as_ref())
    }

    /// Look up a diagram by name
    pub fn get(&self, name: &str) -> Result<&dyn Diagram> {
        match self.diagrams.iter().find(|d| d.name() == name) {
            Some(diagram) => Ok(diagram.as_ref()),
            None => {
                warn!(name, "Unknown diagram requested");
                Err(DiagramError::configuration_error(format!(
                    "unknown diagram '{}' (available: {})",
                    name,
                    self.names().join(", ")
                )))
            }
        }
    }

    /// Look up a diagram and build its graph
    pub fn build(&self, name: &str) -> Result<Digraph> {
        let build_span = span!(Level::INFO, "build_diagram", name);
        let _enter = build_span.enter();

        let graph = self.get(name)?.build()?;
        info!(graph = graph.name(), "Built diagram");
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
