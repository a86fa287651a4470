// CLI interface for edkit using clap
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::commands::aggregate::{execute_aggregate_command, AggregateConfig, OutputFormat};
use crate::commands::copy_path::{execute_copy_path_command, CopyPathConfig};
use crate::commands::identifier::execute_insert_identifier_command;
use crate::commands::sample_config::{execute_sample_config_command, SampleConfigConfig};
use crate::commands::search_definition::{
    execute_search_definition_command, SearchDefinitionConfig,
};
use crate::companion::{toggle_companion, CompanionKind, CompanionRules};
use crate::config::Config;
use crate::editor::StdioHost;
use crate::error::{exit_codes, CliError, EdkitError, Result};
use crate::multiplexer::Multiplexer;
use crate::process::SystemRunner;
use crate::quickfix::{Deletion, QuickfixList};

#[derive(Parser)]
#[command(
    name = "edkit",
    about = "edkit - Editor configuration toolkit",
    version = crate::VERSION,
    long_about = "edkit derives parser, tool, language server and formatter lists from a single language table and provides small helper commands for an editor configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Control color output (auto, always, never)
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten the language table into parser, tool, server and formatter collections
    Aggregate {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the companion (test/implementation) file of a path
    Companion {
        /// Current file
        path: PathBuf,

        /// Toggle between markup and logic files instead
        #[arg(long)]
        markup: bool,
    },

    /// Delete entries from a quickfix list read as JSON
    QfDelete {
        /// Quickfix list JSON file, `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Cursor line (1-based) for single-line mode
        #[arg(long)]
        line: Option<usize>,

        /// Number of entries to delete in single-line mode
        #[arg(long)]
        count: Option<usize>,

        /// Inclusive line range `START:END` for range mode
        #[arg(long)]
        range: Option<String>,
    },

    /// Print a generated identifier (UUID v4)
    Uuid,

    /// Print the path of a file relative to the working directory
    Path {
        path: PathBuf,

        /// Append `:<line>`
        #[arg(long)]
        line: Option<usize>,

        /// Print the absolute path
        #[arg(long)]
        absolute: bool,
    },

    /// Find the definition of the command a file is named after
    Search {
        /// Current file
        path: PathBuf,

        /// Project root to search
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Manage the multiplexer pane next to the editor
    Pane {
        #[command(subcommand)]
        action: PaneAction,
    },

    /// Produce a sample configuration file
    SampleConfig {
        /// Languages to include (detected from the working directory if omitted)
        #[arg(short, long)]
        language: Vec<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completion for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PaneAction {
    /// Print the pane target, creating the session if needed
    Ensure,
    /// Run a command in the pane
    Send { command: String },
    /// Print the command that attaches to the session
    Attach,
    /// List running sessions, marking the configured one with `*`
    List,
}

impl Cli {
    pub fn run(&self) -> Result<i32> {
        self.init_logging();

        if self.verbose && self.quiet {
            return Err(EdkitError::Cli(Box::new(CliError::ConflictingArguments {
                first: "--verbose".to_string(),
                second: "--quiet".to_string(),
                suggestion: "Use either --verbose for more output or --quiet for less output, but not both".to_string(),
            })));
        }

        match &self.command {
            Commands::Aggregate { format } => {
                let result = execute_aggregate_command(&AggregateConfig {
                    config_path: PathBuf::from(&self.config),
                    format: *format,
                })?;
                println!("{}", result.rendered);
                Ok(exit_codes::SUCCESS)
            }
            Commands::Companion { path, markup } => {
                let kind = if *markup {
                    CompanionKind::Markup
                } else {
                    CompanionKind::Test
                };
                let config = self.optional_config()?;
                let rules = CompanionRules::with_config(kind, &config.companions)?;
                let mut host = StdioHost::new();
                Ok(match toggle_companion(&mut host, &rules, path)? {
                    Some(_) => exit_codes::SUCCESS,
                    None => exit_codes::LOOKUP_MISS,
                })
            }
            Commands::QfDelete {
                input,
                line,
                count,
                range,
            } => {
                let deletion = parse_deletion(*line, *count, range.as_deref())?;
                let mut list: QuickfixList = serde_json::from_str(&read_input(input)?)?;
                let before = list.len();
                let cursor_line = list.delete(deletion);
                let output = serde_json::json!({
                    "title": list.title,
                    "items": list.items,
                    "cursor_line": cursor_line,
                    "removed": before - list.len(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(exit_codes::SUCCESS)
            }
            Commands::Uuid => {
                let mut host = StdioHost::new();
                execute_insert_identifier_command(&mut host)?;
                Ok(exit_codes::SUCCESS)
            }
            Commands::Path {
                path,
                line,
                absolute,
            } => {
                let mut host = StdioHost::new();
                execute_copy_path_command(
                    &mut host,
                    &CopyPathConfig {
                        path: path.clone(),
                        cwd: std::env::current_dir()?,
                        line: *line,
                        absolute: *absolute,
                    },
                )?;
                Ok(exit_codes::SUCCESS)
            }
            Commands::Search { path, root } => {
                let mut host = StdioHost::new();
                let found = execute_search_definition_command(
                    &mut host,
                    &SearchDefinitionConfig {
                        path: path.clone(),
                        root: root.clone(),
                    },
                )?;
                Ok(match found {
                    Some(_) => exit_codes::SUCCESS,
                    None => exit_codes::LOOKUP_MISS,
                })
            }
            Commands::Pane { action } => {
                let config = self.optional_config()?;
                let mux = Multiplexer::new(&config.multiplexer, SystemRunner::new());
                match action {
                    PaneAction::Ensure => println!("{}", mux.ensure_pane()?),
                    PaneAction::Send { command } => println!("{}", mux.send(command)?),
                    PaneAction::Attach => println!("{}", mux.attach_command()),
                    PaneAction::List => {
                        for session in mux.sessions()? {
                            let marker = if session == mux.session() { "*" } else { " " };
                            println!("{marker} {session}");
                        }
                    }
                }
                Ok(exit_codes::SUCCESS)
            }
            Commands::SampleConfig { language, output } => {
                let result = execute_sample_config_command(&SampleConfigConfig {
                    languages: language.clone(),
                    project_dir: None,
                    output_file: output.clone(),
                })?;
                if output.is_none() {
                    print!("{}", result.config_generated);
                }
                Ok(exit_codes::SUCCESS)
            }
            Commands::GenerateCompletion { shell } => {
                let mut cmd = Self::command();
                let name = cmd.get_name().to_string();
                generate(*shell, &mut cmd, name, &mut std::io::stdout());
                Ok(exit_codes::SUCCESS)
            }
        }
    }

    /// The configuration file if present, defaults otherwise
    fn optional_config(&self) -> Result<Config> {
        let path = Path::new(&self.config);
        if path.exists() {
            Config::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Config::default())
        }
    }

    fn init_logging(&self) {
        use crate::logging::{init_logging, LogConfig};

        let log_config = LogConfig::from_cli(self.verbose, self.quiet, self.color.clone());

        if !init_logging(log_config) {
            tracing::debug!("Logging already initialized");
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Exactly one of `--line` and `--range` selects the mode
pub fn parse_deletion(
    line: Option<usize>,
    count: Option<usize>,
    range: Option<&str>,
) -> Result<Deletion> {
    match (line, range) {
        (Some(line), None) => Ok(Deletion::Single { line, count }),
        (None, Some(range)) => {
            if count.is_some() {
                return Err(EdkitError::Cli(Box::new(CliError::ConflictingArguments {
                    first: "--count".to_string(),
                    second: "--range".to_string(),
                    suggestion: "--count only applies to --line".to_string(),
                })));
            }
            let invalid = || {
                EdkitError::Cli(Box::new(CliError::InvalidArgument {
                    argument: "--range".to_string(),
                    message: format!("'{range}' is not a line range"),
                    suggestion: Some("Use START:END, e.g. --range 2:4".to_string()),
                }))
            };
            let (start, end) = range.split_once(':').ok_or_else(invalid)?;
            let start = start.trim().parse().map_err(|_| invalid())?;
            let end = end.trim().parse().map_err(|_| invalid())?;
            Ok(Deletion::Range { start, end })
        }
        (Some(_), Some(_)) => Err(EdkitError::Cli(Box::new(CliError::ConflictingArguments {
            first: "--line".to_string(),
            second: "--range".to_string(),
            suggestion: "Use --line for single-line mode or --range for a selection".to_string(),
        }))),
        (None, None) => Err(EdkitError::Cli(Box::new(CliError::InvalidArgument {
            argument: "--line".to_string(),
            message: "no entries selected".to_string(),
            suggestion: Some("Pass --line N or --range START:END".to_string()),
        }))),
    }
}
