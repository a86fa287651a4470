// Error handling framework for edkit
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EdkitError>;

/// Main error type for edkit
#[derive(Debug, Error)]
pub enum EdkitError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] Box<LookupError>),

    #[error("Process execution failed: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("CLI argument error: {0}")]
    Cli(#[from] Box<CliError>),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors. These are fatal: a broken declaration aborts loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid YAML syntax: {message}")]
    InvalidYaml {
        message: String,
        line: Option<u32>,
        column: Option<u32>,
        file_path: Option<PathBuf>,
    },

    #[error("Configuration file not found: {path}")]
    NotFound {
        path: PathBuf,
        suggestion: Option<String>,
    },

    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue {
        message: String,
        field: String,
        value: String,
        expected: String,
        file_path: Option<PathBuf>,
    },

    #[error("Invalid {facet} entry '{key}' for file type '{file_type}': expected {expected}, got {actual}")]
    TypeMismatch {
        file_type: String,
        facet: String,
        key: String,
        expected: String,
        actual: String,
    },
}

/// Recoverable lookup misses, reported to the user without changing editor state
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No {companion} file: {}", .path.display())]
    NoCompanion {
        path: PathBuf,
        companion: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Unknown file type: {}", .path.display())]
    UnknownFileType { path: PathBuf },

    #[error("No search term can be derived from {}", .path.display())]
    NoSearchTerm { path: PathBuf },

    #[error("No definition found for '{term}'")]
    NoDefinition { term: String, root: PathBuf },
}

/// Process execution errors for external shell invocations
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Process spawn failed: {command}")]
    SpawnFailed { command: String, error: String },

    #[error("Process execution failed: {command}")]
    ExecutionFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Process returned no output: {command}")]
    EmptyOutput { command: String },

    #[error("Command not found: {command}")]
    CommandNotFound {
        command: String,
        suggestion: Option<String>,
    },
}

/// CLI argument and command-line interface errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {argument}")]
    InvalidArgument {
        argument: String,
        message: String,
        suggestion: Option<String>,
    },

    #[error("Conflicting arguments: {first} and {second}")]
    ConflictingArguments {
        first: String,
        second: String,
        suggestion: String,
    },
}

/// Format errors with colors and context
pub struct ErrorFormatter {
    use_colors: bool,
}

impl ErrorFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format an error with context and colors
    pub fn format_error(&self, error: &EdkitError) -> String {
        use tracing::error;

        match error {
            EdkitError::Config(_) => {
                error!(error_type = "config", error = %error, "Configuration error occurred");
            }
            EdkitError::Lookup(_) => {
                error!(error_type = "lookup", error = %error, "Lookup failed");
            }
            EdkitError::Process(_) => {
                error!(error_type = "process", error = %error, "Process execution failed");
            }
            EdkitError::Cli(_) => {
                error!(error_type = "cli", error = %error, "CLI error occurred");
            }
            EdkitError::Io(_) => {
                error!(error_type = "io", error = %error, "IO operation failed");
            }
            EdkitError::Json(_) => {
                error!(error_type = "json", error = %error, "JSON serialization failed");
            }
        }

        let mut output = String::new();

        if self.use_colors {
            output.push_str("\x1b[31m"); // Red color
        }
        output.push_str("Error: ");

        if self.use_colors {
            output.push_str("\x1b[0m"); // Reset color
        }

        output.push_str(&error.to_string());

        match error {
            EdkitError::Config(config_err) => {
                self.add_config_context(&mut output, config_err.as_ref());
            }
            EdkitError::Lookup(lookup_err) => {
                self.add_lookup_context(&mut output, lookup_err.as_ref());
            }
            EdkitError::Process(process_err) => {
                self.add_process_context(&mut output, process_err.as_ref());
            }
            EdkitError::Cli(cli_err) => {
                self.add_cli_context(&mut output, cli_err.as_ref());
            }
            _ => {}
        }

        output
    }

    fn add_config_context(&self, output: &mut String, error: &ConfigError) {
        match error {
            ConfigError::InvalidYaml {
                file_path: Some(path),
                line: Some(line),
                ..
            } => {
                output.push_str(&format!("\n  --> {}:{}", path.display(), line));
            }
            ConfigError::NotFound {
                suggestion: Some(suggestion),
                ..
            } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            ConfigError::TypeMismatch {
                file_type, facet, ..
            } => {
                output.push_str(&format!(
                    "\n  Help: check the `{facet}` declaration of '{file_type}'"
                ));
            }
            _ => {}
        }
    }

    fn add_lookup_context(&self, output: &mut String, error: &LookupError) {
        if let LookupError::NoCompanion { candidates, .. } = error {
            for candidate in candidates {
                output.push_str(&format!("\n  Tried: {}", candidate.display()));
            }
        }
    }

    fn add_process_context(&self, output: &mut String, error: &ProcessError) {
        match error {
            ProcessError::CommandNotFound {
                suggestion: Some(suggestion),
                ..
            } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            ProcessError::ExecutionFailed { stderr, .. } if !stderr.is_empty() => {
                output.push_str(&format!("\n  Process error: {stderr}"));
            }
            _ => {}
        }
    }

    fn add_cli_context(&self, output: &mut String, error: &CliError) {
        match error {
            CliError::InvalidArgument {
                suggestion: Some(suggestion),
                ..
            } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            CliError::ConflictingArguments { suggestion, .. } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            _ => {}
        }
    }
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const LOOKUP_MISS: i32 = 3;
    pub const PROCESS_ERROR: i32 = 4;
    pub const CLI_ERROR: i32 = 5;
}

impl EdkitError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EdkitError::Config(_) => exit_codes::CONFIG_ERROR,
            EdkitError::Lookup(_) => exit_codes::LOOKUP_MISS,
            EdkitError::Process(_) => exit_codes::PROCESS_ERROR,
            EdkitError::Cli(_) => exit_codes::CLI_ERROR,
            EdkitError::Io(_) | EdkitError::Json(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Recoverable errors are reported to the user and leave state untouched
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EdkitError::Lookup(_) | EdkitError::Process(_))
    }

    /// Create a user-friendly error message with context
    pub fn user_message(&self, use_colors: bool) -> String {
        let formatter = ErrorFormatter::new(use_colors);
        formatter.format_error(self)
    }
}

impl From<ConfigError> for EdkitError {
    fn from(error: ConfigError) -> Self {
        EdkitError::Config(Box::new(error))
    }
}

impl From<LookupError> for EdkitError {
    fn from(error: LookupError) -> Self {
        EdkitError::Lookup(Box::new(error))
    }
}

impl From<ProcessError> for EdkitError {
    fn from(error: ProcessError) -> Self {
        EdkitError::Process(Box::new(error))
    }
}

// Conversion from serde_yaml::Error to ConfigError
impl From<serde_yaml::Error> for Box<ConfigError> {
    fn from(error: serde_yaml::Error) -> Self {
        let location = error.location();
        Box::new(ConfigError::InvalidYaml {
            message: error.to_string(),
            line: location.as_ref().map(|l| l.line() as u32),
            column: location.as_ref().map(|l| l.column() as u32),
            file_path: None,
        })
    }
}
