// edkit - Library module
// Language tool registry aggregation and small editor helper commands

pub mod cli;
pub mod commands;
pub mod companion;
pub mod config;
pub mod editor;
pub mod error;
pub mod language;
pub mod logging;
pub mod multiplexer;
pub mod process;
pub mod quickfix;

// Re-export main types for easier access
pub use companion::{
    toggle_companion, CompanionConfig, CompanionKind, CompanionRule, CompanionRuleConfig,
    CompanionRules,
};
pub use config::{Config, MultiplexerConfig};
pub use editor::{EditorHost, NotifyLevel, RecordingHost, StdioHost};
pub use error::{
    exit_codes, CliError, ConfigError, EdkitError, LookupError, ProcessError, Result,
};
pub use language::{
    Aggregate, Aggregator, FormatterDecl, FormatterSpec, LanguageEntry, LanguageRegistry,
    Options, RegistryBuilder, ResolvedChain, OTHER_FILE_TYPE,
};
pub use logging::{ColorConfig, LogConfig, LogFormat};
pub use multiplexer::Multiplexer;
pub use process::{ShellRunner, SystemRunner};
pub use quickfix::{delete_items, Deletion, DeletionOutcome, QuickfixItem, QuickfixList};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get formatted version string
pub fn version_info() -> String {
    format!("{NAME} {VERSION}")
}
