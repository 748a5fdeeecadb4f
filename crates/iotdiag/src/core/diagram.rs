//! Core diagram trait
//!
//! A diagram is a named, self-contained graph definition. Each built-in
//! diagram implements this trait so the catalog can list, look up and build
//! them uniformly.

use super::{Digraph, Result};

/// Core trait for diagram definitions
pub trait Diagram: Send + Sync {
    /// Short name used to select the diagram, e.g. `"sequence"`
    fn name(&self) -> &'static str;

    /// One-line description
    fn summary(&self) -> &'static str;

    /// Output path without extension used when none is given
    fn default_stem(&self) -> &'static str;

    /// Build a fresh graph for this diagram
    fn build(&self) -> Result<Digraph>;
}
