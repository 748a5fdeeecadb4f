//! Built-in diagrams of the IoT system
//!
//! Each diagram implements [`crate::core::Diagram`]; the [`Catalog`] resolves
//! them by name.

pub mod activity;
pub mod catalog;
pub mod sequence;

pub use activity::ActivityDiagram;
pub use catalog::Catalog;
pub use sequence::SequenceDiagram;
