//! Graphviz process invocation
//!
//! The layout engines are external executables. [`GraphvizCommand`] feeds
//! DOT source on stdin and collects the rendered bytes from stdout.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, trace, warn};

use super::{DiagramError, LayoutEngine, OutputFormat, Result};

/// A runnable Graphviz layout engine
#[derive(Debug, Clone, Default)]
pub struct GraphvizCommand {
    engine: LayoutEngine,
    /// Explicit executable; falls back to the engine name looked up on PATH
    program: Option<PathBuf>,
}

impl GraphvizCommand {
    /// Use the named engine from PATH
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            program: None,
        }
    }

    /// Use a specific executable for the engine
    pub fn with_program(engine: LayoutEngine, program: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            program: Some(program.into()),
        }
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    fn program(&self) -> PathBuf {
        self.program
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.engine.as_str()))
    }

    fn spawn_error(&self, source: std::io::Error) -> DiagramError {
        if source.kind() == ErrorKind::NotFound {
            DiagramError::render_error(format!(
                "layout engine '{}' is not installed (looked for '{}')",
                self.engine,
                self.program().display()
            ))
        } else {
            DiagramError::render_error(format!(
                "failed to start layout engine '{}': {}",
                self.engine, source
            ))
        }
    }

    /// Returns true if the engine executable can be started
    pub fn is_available(&self) -> bool {
        let available = Command::new(self.program())
            .arg("-V")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        trace!(engine = %self.engine, available, "Checked layout engine availability");
        available
    }

    /// Lay out `source` and return the engine output in `format`
    pub fn run(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>> {
        debug!(
            engine = %self.engine,
            format = %format,
            source_len = source.len(),
            "Running layout engine"
        );

        let mut child = Command::new(self.program())
            .arg(format!("-T{}", format.as_str()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Feed stdin while draining stdout and stderr so neither pipe can
        // fill up and block the other side.
        let stdin = child.stdin.take();
        let (sent, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(|e| {
            DiagramError::render_error(format!(
                "layout engine '{}' did not finish: {}",
                self.engine, e
            ))
        })?;

        // An engine that exits early closes stdin; its stderr explains why.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(engine = %self.engine, status = ?output.status.code(), "Layout engine failed");
            return Err(DiagramError::render_error(format!(
                "layout engine '{}' failed: {}",
                self.engine,
                stderr.trim()
            )));
        }

        match sent {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(DiagramError::render_error(format!(
                    "failed to send source to layout engine '{}': {}",
                    self.engine, e
                )))
            }
            Err(_) => {
                return Err(DiagramError::render_error(format!(
                    "failed to send source to layout engine '{}'",
                    self.engine
                )))
            }
        }

        if output.stdout.is_empty() {
            return Err(DiagramError::render_error(format!(
                "layout engine '{}' produced no output",
                self.engine
            )));
        }

        debug!(bytes = output.stdout.len(), "Layout engine finished");
        Ok(output.stdout)
    }
}
