// Logging setup for edkit. Logs always go to stderr so that stdout stays
// reserved for machine-readable command output.
use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Output format
    pub format: LogFormat,
    /// Color output configuration
    pub color: ColorConfig,
    /// Whether to show targets (module names)
    pub show_targets: bool,
}

/// Log output format options
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human readable output for terminals
    Pretty,
    /// JSON output, one object per line
    Json,
    /// Compact single-line format
    Compact,
}

/// Color output configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ColorConfig {
    Auto,
    Always,
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Pretty,
            color: ColorConfig::Auto,
            show_targets: false,
        }
    }
}

impl LogConfig {
    /// Create logging configuration from CLI arguments
    pub fn from_cli(verbose: bool, quiet: bool, color: Option<String>) -> Self {
        let level = if quiet {
            Level::ERROR
        } else if verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };

        let color = match color.as_deref() {
            Some("always") => ColorConfig::Always,
            Some("never") => ColorConfig::Never,
            _ => ColorConfig::Auto,
        };

        Self {
            level,
            color,
            ..Self::default()
        }
    }

    /// Check if colors should be used based on configuration and terminal
    pub fn should_use_colors(&self) -> bool {
        match self.color {
            ColorConfig::Always => true,
            ColorConfig::Never => false,
            ColorConfig::Auto => {
                io::stderr().is_terminal()
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
                    && std::env::var("NO_COLOR").is_err()
            }
        }
    }

    fn env_filter(&self) -> EnvFilter {
        // EDKIT_LOG overrides the CLI-derived level, e.g. EDKIT_LOG=edkit::language=trace
        EnvFilter::try_from_env("EDKIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(format!("edkit={}", self.level)))
    }
}

/// Initialize the logging system. Returns false when a global subscriber was
/// already installed, in which case the call changes nothing.
pub fn init_logging(config: LogConfig) -> bool {
    let env_filter = config.env_filter();
    let ansi = config.should_use_colors();

    // try_init only fails when a global subscriber is already installed
    let installed = match config.format {
        LogFormat::Pretty => fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_ansi(ansi)
            .with_target(config.show_targets)
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .json()
            .try_init(),
        LogFormat::Compact => fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_ansi(ansi)
            .compact()
            .with_target(config.show_targets)
            .try_init(),
    };

    installed.is_ok()
}

/// Logging helpers for recurring events
pub mod utils {
    use std::path::Path;
    use tracing::{debug, span, Level, Span};

    /// Create a span for registry loading
    pub fn registry_loading_span(path: &Path) -> Span {
        span!(Level::DEBUG, "registry_loading", path = %path.display())
    }

    /// Create a span for one aggregation pass
    pub fn aggregation_span(entry_count: usize) -> Span {
        span!(Level::DEBUG, "aggregation", entries = entry_count)
    }

    /// Log a shell invocation
    pub fn log_shell_command(program: &str, args: &[String]) {
        debug!(program = %program, args = ?args, "Running shell command");
    }
}
