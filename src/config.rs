// Configuration file handling for edkit
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::companion::CompanionConfig;
use crate::error::{ConfigError, EdkitError, Result};
use crate::language::LanguageEntry;

pub const DEFAULT_CONFIG_FILE: &str = "edkit.yaml";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File type to language declaration, in registration order
    #[serde(default)]
    pub languages: serde_yaml::Mapping,
    #[serde(default)]
    pub multiplexer: MultiplexerConfig,
    /// Extra companion-file rules
    #[serde(default)]
    pub companions: CompanionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultiplexerConfig {
    /// Multiplexer executable
    pub program: String,
    /// Session that hosts the editor's companion pane
    pub session: String,
}

impl Default for MultiplexerConfig {
    fn default() -> Self {
        Self {
            program: "tmux".to_string(),
            session: "edkit".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EdkitError::Config(Box::new(ConfigError::NotFound {
                path: path.to_path_buf(),
                suggestion: Some(format!(
                    "Create a {DEFAULT_CONFIG_FILE} with a `languages:` table or pass --config"
                )),
            })));
        }

        if !path.is_file() {
            return Err(EdkitError::Config(Box::new(ConfigError::InvalidValue {
                message: "Configuration path is not a file".to_string(),
                field: "config_path".to_string(),
                value: path.display().to_string(),
                expected: "file path".to_string(),
                file_path: Some(path.to_path_buf()),
            })));
        }

        let content = std::fs::read_to_string(path)?;

        Self::from_yaml_with_context(&content, Some(path))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_yaml_with_context(yaml, None)
    }

    fn from_yaml_with_context(yaml: &str, path: Option<&Path>) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            let mut config_error = *Box::<ConfigError>::from(e);
            if let ConfigError::InvalidYaml {
                ref mut file_path, ..
            } = config_error
            {
                *file_path = path.map(Path::to_path_buf);
            }
            EdkitError::Config(Box::new(config_error))
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            tracing::warn!("Configuration declares no languages");
        }

        if self.multiplexer.session.trim().is_empty() {
            return Err(EdkitError::Config(Box::new(ConfigError::InvalidValue {
                message: "Multiplexer session name cannot be empty".to_string(),
                field: "multiplexer.session".to_string(),
                value: self.multiplexer.session.clone(),
                expected: "non-empty session name".to_string(),
                file_path: None,
            })));
        }

        // Surface malformed language tables at load time
        self.language_entries()?;
        Ok(())
    }

    /// Language declarations in file order. A `null` body is an empty entry.
    pub fn language_entries(&self) -> Result<Vec<(String, LanguageEntry)>> {
        let mut entries = Vec::with_capacity(self.languages.len());

        for (key, body) in &self.languages {
            let file_type = key.as_str().ok_or_else(|| {
                EdkitError::Config(Box::new(ConfigError::InvalidValue {
                    message: "Language keys must be file type names".to_string(),
                    field: "languages".to_string(),
                    value: format!("{key:?}"),
                    expected: "string".to_string(),
                    file_path: None,
                }))
            })?;

            let entry = if body.is_null() {
                LanguageEntry::default()
            } else {
                serde_yaml::from_value(body.clone()).map_err(|e| {
                    EdkitError::Config(Box::new(ConfigError::InvalidValue {
                        message: e.to_string(),
                        field: format!("languages.{file_type}"),
                        value: format!("{body:?}"),
                        expected: "language declaration (parser, tools, servers, formatters)"
                            .to_string(),
                        file_path: None,
                    }))
                })?
            };

            entries.push((file_type.to_string(), entry));
        }

        Ok(entries)
    }
}
