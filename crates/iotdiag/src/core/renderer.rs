//! Renderers for graph output
//!
//! [`DotRenderer`] produces DOT source text. [`GraphvizRenderer`] runs that
//! source through a layout engine and either returns the image bytes or
//! writes them next to an output stem.
//!
//! File output goes through a temporary file in the target directory which
//! is persisted only after the engine succeeded, so a failed render never
//! leaves a partial image behind.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, span, trace, Level};

use super::dot::to_dot;
use super::{
    Database, DiagramError, Digraph, GraphvizCommand, LayoutEngine, OutputFormat, Result,
};

/// Core trait for graph renderers
///
/// Each renderer turns a database into one kind of output. Renderers never
/// mutate the database they are given.
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the produced output format
    fn format(&self) -> &'static str;
}

/// Renders a graph to DOT source text
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DotRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer<Digraph> for DotRenderer {
    type Output = String;

    fn render(&self, graph: &Digraph) -> Result<String> {
        graph.validate()?;
        Ok(to_dot(graph))
    }

    fn name(&self) -> &'static str {
        "dot-source"
    }

    fn format(&self) -> &'static str {
        "dot"
    }
}

/// Options controlling an image render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Image format requested from the engine
    pub format: OutputFormat,
    /// Layout engine to run
    pub engine: LayoutEngine,
    /// Remove the intermediate DOT source file after rendering
    pub cleanup: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            engine: LayoutEngine::Dot,
            cleanup: true,
        }
    }
}

impl RenderOptions {
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}

/// Renders a graph to an image through a Graphviz layout engine
#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    options: RenderOptions,
    command: GraphvizCommand,
}

impl GraphvizRenderer {
    /// Create a renderer with default options (PNG, `dot`, cleanup on)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            command: GraphvizCommand::new(options.engine),
        }
    }

    /// Replace the engine command, e.g. to point at a specific executable
    pub fn with_command(mut self, command: GraphvizCommand) -> Self {
        self.options.engine = command.engine();
        self.command = command;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Returns true if the configured layout engine can be started
    pub fn is_available(&self) -> bool {
        self.command.is_available()
    }

    /// Lay out the graph and return the produced bytes
    pub fn pipe(&self, graph: &Digraph) -> Result<Vec<u8>> {
        graph.validate()?;
        self.command.run(&to_dot(graph), self.options.format)
    }

    /// Render the graph to `<stem>.<ext>` and return that path
    ///
    /// `stem` is the output path without extension. When cleanup is disabled
    /// the DOT source is kept at `stem` itself.
    ///
    /// Fails with a configuration error before touching the filesystem if an
    /// edge references an unknown node, with an IO error if the target
    /// directory cannot be written, and with a render error if the layout
    /// engine is missing or fails.
    pub fn render_to_path(&self, graph: &Digraph, stem: impl AsRef<Path>) -> Result<PathBuf> {
        let stem = stem.as_ref();
        let render_span = span!(
            Level::INFO,
            "render_to_path",
            graph = %graph.name(),
            stem = %stem.display(),
            format = %self.options.format,
            engine = %self.options.engine
        );
        let _enter = render_span.enter();

        graph.validate()?;

        let output_path = output_path(stem, self.options.format);
        let directory = target_directory(stem);
        trace!(directory = %directory.display(), "Preparing staging file");

        // Fails here when the directory is missing or read-only.
        let mut builder = tempfile::Builder::new();
        builder.prefix(".iotdiag-").suffix(".part");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Staging files default to 0600; the image should not.
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        let mut staging = builder
            .tempfile_in(&directory)
            .map_err(|e| DiagramError::io_error(&directory, e))?;

        let source = to_dot(graph);
        if !self.options.cleanup {
            fs::write(stem, &source).map_err(|e| DiagramError::io_error(stem, e))?;
            debug!(source_path = %stem.display(), "Kept intermediate source");
        }

        let bytes = self.command.run(&source, self.options.format)?;

        staging
            .write_all(&bytes)
            .map_err(|e| DiagramError::io_error(staging.path(), e))?;
        staging
            .persist(&output_path)
            .map_err(|e| DiagramError::io_error(&output_path, e.error))?;

        info!(
            output = %output_path.display(),
            bytes = bytes.len(),
            "Rendered diagram"
        );
        Ok(output_path)
    }
}

impl Renderer<Digraph> for GraphvizRenderer {
    type Output = Vec<u8>;

    fn render(&self, graph: &Digraph) -> Result<Vec<u8>> {
        self.pipe(graph)
    }

    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn format(&self) -> &'static str {
        self.options.format.as_str()
    }
}

/// `<stem>.<ext>`, appended rather than replacing any dot already in the stem
pub fn output_path(stem: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

fn target_directory(stem: &Path) -> PathBuf {
    match stem.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write only the DOT source of a graph to `path`
pub fn save_source(graph: &Digraph, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let source = DotRenderer::new().render(graph)?;
    fs::write(path, source).map_err(|e| DiagramError::io_error(path, e))?;
    debug!(path = %path.display(), "Saved DOT source");
    Ok(path.to_path_buf())
}
