//! Core abstractions for graph rendering
//!
//! The graph model, DOT generation, the layout engine wrapper and the
//! renderers built on top of them.

mod database;
mod description;
mod diagram;
pub mod dot;
mod engine;
mod error;
mod graph;
pub mod logging;
mod renderer;
mod types;

pub use database::*;
pub use description::*;
pub use diagram::*;
pub use engine::*;
pub use error::*;
pub use graph::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
