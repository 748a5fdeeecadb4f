//! Command-line interface for the iotdiag utility
//!
//! Renders the built-in IoT diagrams, or any JSON graph description, through
//! Graphviz.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use iotdiag::core::logging::{init_logging, resolve_log_level};
use iotdiag::{
    output_path, Catalog, Database, Digraph, GraphDescription, GraphvizRenderer, LayoutEngine,
    OutputFormat, RenderOptions,
};

/// iotdiag - Render the IoT system diagrams with Graphviz
#[derive(Parser)]
#[command(name = "iotdiag")]
#[command(about = "Render the IoT activity and sequence diagrams with Graphviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error) [default: warn]
    ///
    /// Overrides IOTDIAG_LOG_LEVEL and RUST_LOG.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json) [default: compact]
    ///
    /// Overrides IOTDIAG_LOG_FORMAT.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Where the graph comes from
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct GraphSource {
    /// Built-in diagram name (see `iotdiag list`)
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    pub diagram: Option<String>,

    /// JSON graph description file
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram to an image file
    Render {
        #[command(flatten)]
        source: GraphSource,

        /// Output path without extension (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Png)]
        format: FormatChoice,

        /// Graphviz layout engine
        #[arg(short, long, value_enum, default_value_t = EngineChoice::Dot)]
        engine: EngineChoice,

        /// Keep the intermediate DOT source next to the image
        #[arg(long)]
        keep_source: bool,
    },

    /// Print the DOT source of a diagram
    Source {
        #[command(flatten)]
        source: GraphSource,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a built-in diagram as a JSON graph description
    Export {
        /// Built-in diagram name
        diagram: String,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a JSON graph description
    Validate {
        /// Description file to validate
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show built-in diagrams
    List {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported image formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Png,
    Svg,
    Pdf,
    Jpg,
    Gif,
    Dot,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Svg => OutputFormat::Svg,
            FormatChoice::Pdf => OutputFormat::Pdf,
            FormatChoice::Jpg => OutputFormat::Jpg,
            FormatChoice::Gif => OutputFormat::Gif,
            FormatChoice::Dot => OutputFormat::Dot,
        }
    }
}

/// Supported layout engines
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum EngineChoice {
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
    Osage,
    Patchwork,
}

impl From<EngineChoice> for LayoutEngine {
    fn from(value: EngineChoice) -> Self {
        match value {
            EngineChoice::Dot => LayoutEngine::Dot,
            EngineChoice::Neato => LayoutEngine::Neato,
            EngineChoice::Fdp => LayoutEngine::Fdp,
            EngineChoice::Sfdp => LayoutEngine::Sfdp,
            EngineChoice::Circo => LayoutEngine::Circo,
            EngineChoice::Twopi => LayoutEngine::Twopi,
            EngineChoice::Osage => LayoutEngine::Osage,
            EngineChoice::Patchwork => LayoutEngine::Patchwork,
        }
    }
}

#[derive(Serialize)]
struct DiagramEntry {
    name: &'static str,
    summary: &'static str,
    default_output: &'static str,
    nodes: usize,
    edges: usize,
}

/// Main CLI application
pub struct DiagramApp {
    catalog: Catalog,
}

impl DiagramApp {
    /// Create a new application with the built-in diagrams
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Flags win over IOTDIAG_LOG_LEVEL and RUST_LOG
        let log_level = resolve_log_level(cli.log_level.map(|level| level.as_str()), "warn");
        let log_format = cli.log_format.map(|format| format.as_str());

        if let Err(e) = init_logging(Some(&log_level), log_format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("iotdiag v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                source,
                output,
                format,
                engine,
                keep_source,
            } => self.render_command(
                &source,
                output,
                RenderOptions {
                    format: format.into(),
                    engine: engine.into(),
                    cleanup: !keep_source,
                },
                cli.verbose,
            ),
            Commands::Source { source, output } => {
                self.source_command(&source, output, cli.verbose)
            }
            Commands::Export { diagram, output } => self.export_command(&diagram, output),
            Commands::Validate { input } => self.validate_command(&input, cli.verbose),
            Commands::List { json } => self.list_command(json),
        }
    }

    /// Build the graph named by the arguments
    pub fn load_graph(&self, source: &GraphSource) -> Result<Digraph> {
        match (&source.diagram, &source.input) {
            (_, Some(path)) => iotdiag::load(path)
                .with_context(|| format!("Failed to load graph description '{}'", path.display())),
            (Some(name), None) => Ok(self.catalog.build(name)?),
            (None, None) => bail!("Specify a diagram name or --input FILE"),
        }
    }

    /// Default output stem for the graph source
    fn default_stem(&self, source: &GraphSource) -> Result<PathBuf> {
        match (&source.diagram, &source.input) {
            (_, Some(path)) => Ok(path.with_extension("")),
            (Some(name), None) => Ok(PathBuf::from(self.catalog.get(name)?.default_stem())),
            (None, None) => bail!("Specify a diagram name or --input FILE"),
        }
    }

    /// Handle the render command
    fn render_command(
        &self,
        source: &GraphSource,
        output: Option<PathBuf>,
        options: RenderOptions,
        verbose: bool,
    ) -> Result<()> {
        let graph = self.load_graph(source)?;
        let renderer = GraphvizRenderer::with_options(options);

        if output.as_deref().map(is_stdout).unwrap_or(false) {
            if crossterm::tty::IsTty::is_tty(&io::stdout()) && !options.format.is_text() {
                bail!(
                    "Refusing to write {} data to a terminal; redirect stdout or use --output",
                    options.format
                );
            }
            let bytes = renderer.pipe(&graph)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            debug!(bytes = bytes.len(), "Wrote image to stdout");
            return Ok(());
        }

        let stem = match output {
            Some(path) => path,
            None => self.default_stem(source)?,
        };
        if let Some(input) = &source.input {
            check_not_input(input, &output_path(&stem, options.format))?;
            if !options.cleanup {
                check_not_input(input, &stem)?;
            }
        }
        let path = renderer.render_to_path(&graph, &stem)?;

        if verbose {
            eprintln!(
                "Rendered '{}' ({} nodes, {} edges)",
                graph.name(),
                graph.node_count(),
                graph.edge_count()
            );
        }
        println!("{}", path.display());
        Ok(())
    }

    /// Handle the source command
    fn source_command(
        &self,
        source: &GraphSource,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let graph = self.load_graph(source)?;
        let dot = iotdiag::source(&graph)?;

        if verbose {
            eprintln!("Generated {} bytes of DOT source", dot.len());
        }
        self.write_output(output, &dot)
    }

    /// Handle the export command
    fn export_command(&self, diagram: &str, output: Option<PathBuf>) -> Result<()> {
        let graph = self.catalog.build(diagram)?;
        let json = graph.to_description().to_json_pretty()?;
        self.write_output(output, &json)
    }

    /// Handle the validate command
    fn validate_command(&self, input: &Path, verbose: bool) -> Result<()> {
        let description = GraphDescription::load(input)?;
        if verbose {
            eprintln!(
                "Read description '{}' with {} nodes and {} edges",
                description.name,
                description.nodes.len(),
                description.edges.len()
            );
        }

        let name = description.name.clone();
        let graph = description.into_graph()?;
        graph
            .validate()
            .with_context(|| format!("Invalid graph '{}'", name))?;
        println!("✓ Valid graph '{}'", name);
        Ok(())
    }

    /// Handle the list command
    fn list_command(&self, json: bool) -> Result<()> {
        let mut entries = Vec::new();
        for diagram in self.catalog.iter() {
            let graph = diagram.build()?;
            entries.push(DiagramEntry {
                name: diagram.name(),
                summary: diagram.summary(),
                default_output: diagram.default_stem(),
                nodes: graph.node_count(),
                edges: graph.edge_count(),
            });
        }

        if json {
            let listing = serde_json::json!({
                "diagrams": entries,
                "total": entries.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Built-in diagrams:");
            for entry in &entries {
                println!("  {:<10} - {}", entry.name, entry.summary);
            }
            println!();
            println!("Total: {} diagrams", entries.len());
        }
        info!(count = entries.len(), "Listed diagrams");
        Ok(())
    }

    /// Write text output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if !is_stdout(&path) => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the catalog (for testing)
    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for DiagramApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Refuse to write a rendered file over the description it was read from
fn check_not_input(input: &Path, target: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(target)) {
        (Ok(input), Ok(target)) => input == target,
        _ => input == target,
    };
    if same {
        bail!(
            "Output '{}' would overwrite the input description; pass --output",
            target.display()
        );
    }
    Ok(())
}
