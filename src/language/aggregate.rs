// Flattening of the language registry into plugin-facing collections

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::entry::{LanguageEntry, Options};
use super::formatter::value_type_name;

/// Derived view of a registry, handed to plugin setup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Syntax parsers to ensure installed
    pub parser_installs: BTreeSet<String>,
    /// Tool packages to ensure installed, with their options
    pub tool_packages: BTreeMap<String, Value>,
    /// Language server name to server options
    pub server_configs: BTreeMap<String, Value>,
    /// File type to formatter names in run order
    pub formatters_by_file_type: BTreeMap<String, Vec<String>>,
    /// Formatter name to formatter-specific configuration
    pub formatter_options: BTreeMap<String, Value>,
}

/// Accumulates entries one at a time. Collisions on tool, server and
/// formatter-option names resolve to the entry added last.
#[derive(Debug, Default)]
pub struct Aggregator {
    output: Aggregate,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: &LanguageEntry) -> Result<()> {
        let file_type = entry.file_type();

        if let Some(parser) = entry.parser_name() {
            self.output.parser_installs.insert(parser.to_string());
        }

        if let Some(tools) = &entry.tool_packages {
            merge_options(&mut self.output.tool_packages, tools, file_type, "tools")?;
        }

        if let Some(servers) = &entry.server_config {
            merge_options(
                &mut self.output.server_configs,
                servers,
                file_type,
                "servers",
            )?;
        }

        if let Some(spec) = &entry.formatter_chain {
            let chain = spec.resolve(file_type)?;

            for name in chain.installs {
                self.output
                    .tool_packages
                    .entry(name)
                    .or_insert_with(|| Value::Object(Map::new()));
            }
            for (name, props) in chain.props {
                self.output.formatter_options.insert(name, props);
            }

            let mut seen = BTreeSet::new();
            for name in &chain.names {
                if !seen.insert(name.as_str()) {
                    warn!(
                        file_type = %file_type,
                        formatter = %name,
                        "Formatter declared more than once in one chain"
                    );
                }
            }

            self.output
                .formatters_by_file_type
                .insert(file_type.to_string(), chain.names);
        }

        Ok(())
    }

    pub fn finish(self) -> Aggregate {
        debug!(
            parsers = self.output.parser_installs.len(),
            tools = self.output.tool_packages.len(),
            servers = self.output.server_configs.len(),
            formatted_file_types = self.output.formatters_by_file_type.len(),
            "Language registry aggregated"
        );
        self.output
    }
}

/// Union `source` into `target`. Option values must be objects; `null`
/// stands for an empty options object.
fn merge_options(
    target: &mut BTreeMap<String, Value>,
    source: &Options,
    file_type: &str,
    facet: &str,
) -> Result<()> {
    for (name, options) in source {
        let options = match options {
            Value::Object(_) => options.clone(),
            Value::Null => Value::Object(Map::new()),
            other => {
                return Err(ConfigError::TypeMismatch {
                    file_type: file_type.to_string(),
                    facet: facet.to_string(),
                    key: name.clone(),
                    expected: "options object".to_string(),
                    actual: value_type_name(other).to_string(),
                }
                .into())
            }
        };

        if let Some(previous) = target.insert(name.clone(), options) {
            debug!(
                file_type = %file_type,
                name = %name,
                previous = %previous,
                "Overriding {facet} options declared by an earlier file type"
            );
        }
    }
    Ok(())
}

impl Aggregate {
    /// Parser names in a stable order
    pub fn parser_list(&self) -> Vec<&str> {
        self.parser_installs.iter().map(String::as_str).collect()
    }

    /// Tool names in a stable order
    pub fn tool_list(&self) -> Vec<&str> {
        self.tool_packages.keys().map(String::as_str).collect()
    }

    pub fn formatters_for(&self, file_type: &str) -> &[String] {
        self.formatters_by_file_type
            .get(file_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
