// Language registry: built once from declarations, immutable afterwards

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;

use super::aggregate::{Aggregate, Aggregator};
use super::entry::LanguageEntry;

/// Accumulates language entries in registration order.
///
/// ```
/// use edkit::language::{FormatterSpec, RegistryBuilder};
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .register("typescript")
///     .with_formatters(FormatterSpec::ordered(["prettierd"]));
/// builder.register("rust");
/// let registry = builder.build();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<LanguageEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh entry for `file_type`, replacing any earlier one.
    /// A replaced entry keeps its original position.
    pub fn register(&mut self, file_type: impl Into<String>) -> &mut LanguageEntry {
        self.insert(LanguageEntry::new(file_type))
    }

    /// Table-style registration of a complete entry
    pub fn insert(&mut self, entry: LanguageEntry) -> &mut LanguageEntry {
        let index = match self
            .entries
            .iter()
            .position(|existing| existing.file_type() == entry.file_type())
        {
            Some(index) => {
                debug!(file_type = %entry.file_type(), "Replacing earlier language entry");
                self.entries[index] = entry;
                index
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Register every language of a loaded configuration file
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::new();
        for (file_type, mut entry) in config.language_entries()? {
            entry.set_file_type(file_type);
            builder.insert(entry);
        }
        Ok(builder)
    }

    pub fn build(self) -> LanguageRegistry {
        LanguageRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable set of language entries
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    entries: Vec<LanguageEntry>,
}

impl LanguageRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config = Config::from_yaml(yaml)?;
        Ok(RegistryBuilder::from_config(&config)?.build())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let _span = crate::logging::utils::registry_loading_span(path).entered();
        let config = Config::from_file(path)?;
        Ok(RegistryBuilder::from_config(&config)?.build())
    }

    pub fn get(&self, file_type: &str) -> Option<&LanguageEntry> {
        self.entries
            .iter()
            .find(|entry| entry.file_type() == file_type)
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.entries.iter()
    }

    pub fn file_types(&self) -> Vec<&str> {
        self.entries.iter().map(LanguageEntry::file_type).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten all entries into the collections plugin setup consumes.
    /// The first malformed declaration aborts the whole pass.
    pub fn aggregate(&self) -> Result<Aggregate> {
        let _span = crate::logging::utils::aggregation_span(self.len()).entered();
        let mut aggregator = Aggregator::new();
        for entry in &self.entries {
            aggregator.add_entry(entry)?;
        }
        Ok(aggregator.finish())
    }
}
