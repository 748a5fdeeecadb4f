//! Logging infrastructure
//!
//! Structured logging through the `tracing` crate, with a
//! `tracing-subscriber` backend configured by level and format.
//!
//! # Usage
//!
//! ```rust
//! use iotdiag::core::logging::init_logging;
//!
//! // Initialize with custom level and format
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Log Formats
//!
//! - `compact`: Single-line format (default)
//! - `pretty`: Multi-line format with source locations
//! - `json`: JSON lines for log aggregation
//!
//! # Environment Variables
//!
//! - `IOTDIAG_LOG_LEVEL`: log level or filter directive
//! - `IOTDIAG_LOG_FORMAT`: log format
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when
//!   `IOTDIAG_LOG_LEVEL` is unset
//!
//! An explicit level passed to [`init_logging`] always wins over both.
//!
//! All output goes to stderr; stdout is reserved for rendered output.
//!
//! ```bash
//! RUST_LOG="info,iotdiag::core::engine=trace" iotdiag render sequence
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the filter directive to use
///
/// The explicit level wins, then `IOTDIAG_LOG_LEVEL`, then `RUST_LOG`, then
/// `fallback`.
pub fn resolve_log_level(level: Option<&str>, fallback: &str) -> String {
    pick_level(
        level,
        std::env::var("IOTDIAG_LOG_LEVEL").ok(),
        std::env::var("RUST_LOG").ok(),
        fallback,
    )
}

fn pick_level(
    explicit: Option<&str>,
    iotdiag_level: Option<String>,
    rust_log: Option<String>,
    fallback: &str,
) -> String {
    explicit
        .map(str::to_string)
        .or(iotdiag_level)
        .or(rust_log)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Initialize the tracing subscriber with the given log level and format
///
/// * `level` - log level or filter directive. If None, uses
///   `IOTDIAG_LOG_LEVEL`, then `RUST_LOG`, then `info`. See
///   [`resolve_log_level`].
/// * `format` - compact|pretty|json. If None, uses `IOTDIAG_LOG_FORMAT`,
///   then `compact`.
///
/// Returns an error for an unknown format or level directive, or when a
/// global subscriber is already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = resolve_log_level(level, "info");

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var("IOTDIAG_LOG_FORMAT").ok())
        .unwrap_or_else(|| "compact".to_string());

    let filter = EnvFilter::try_new(&log_level)
        .map_err(|e| format!("Invalid log level '{}': {}", log_level, e))?;

    let format =
        LogFormat::from_str(&log_format).map_err(|e| format!("Invalid log format: {}", e))?;

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
