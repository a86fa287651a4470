// Registry aggregation command: load, flatten, render

use std::path::PathBuf;

use crate::error::{ConfigError, EdkitError, Result};
use crate::language::{Aggregate, LanguageRegistry};

/// Rendering of the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub config_path: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct AggregateResult {
    pub aggregate: Aggregate,
    pub rendered: String,
}

pub fn render(aggregate: &Aggregate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(aggregate)?),
        OutputFormat::Yaml => serde_yaml::to_string(aggregate)
            .map_err(|e| EdkitError::Config(Box::<ConfigError>::from(e))),
    }
}

pub fn execute_aggregate_command(config: &AggregateConfig) -> Result<AggregateResult> {
    let registry = LanguageRegistry::from_file(&config.config_path)?;
    let aggregate = registry.aggregate()?;

    tracing::info!(
        languages = registry.len(),
        parsers = aggregate.parser_installs.len(),
        tools = aggregate.tool_packages.len(),
        "Aggregated language registry"
    );

    let rendered = render(&aggregate, config.format)?;
    Ok(AggregateResult {
        aggregate,
        rendered,
    })
}
