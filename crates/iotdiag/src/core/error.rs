//! Core error types for diagram rendering
//!
//! Every fallible operation in the crate returns [`DiagramError`]. The three
//! variants map onto the three ways a render can fail: the graph description
//! is wrong, the layout engine is missing or fails, or the filesystem refuses
//! a read or write.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Core error types for diagram rendering
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error at '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new IO error tied to the path that caused it
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true for graph description problems
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }

    /// Returns true for layout engine failures
    pub fn is_render(&self) -> bool {
        matches!(self, Self::RenderError { .. })
    }

    /// Returns true for filesystem failures
    pub fn is_io(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}
