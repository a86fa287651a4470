// Formatter chain declarations and their normalization into an ordered name list

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Formatter chain of one file type.
///
/// The shape (list or map) is fixed when the chain is authored. Element values
/// are checked when the registry is aggregated, so a malformed element is a
/// load-time configuration error rather than an authoring-time panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatterSpec {
    /// `[prettierd, eslint_d]`: formatter names in run order
    Ordered(Vec<Value>),
    /// `{ stylua: { install: true }, fmt: goimports }`: per-formatter metadata
    /// or an alias string, in declaration order
    Keyed(Map<String, Value>),
}

/// Options of a keyed formatter declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatterDecl {
    install: bool,
    props: Option<Value>,
}

impl FormatterDecl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the formatter to be installed as a tool package
    pub fn install(mut self) -> Self {
        self.install = true;
        self
    }

    /// Formatter-specific configuration handed to the formatter plugin
    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }
}

impl From<FormatterDecl> for Value {
    fn from(decl: FormatterDecl) -> Self {
        let mut object = Map::new();
        if decl.install {
            object.insert("install".to_string(), Value::Bool(true));
        }
        if let Some(props) = decl.props {
            object.insert("props".to_string(), props);
        }
        Value::Object(object)
    }
}

/// A formatter chain after its element types have been checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedChain {
    /// Formatter names in run order. Duplicates are kept.
    pub names: Vec<String>,
    /// Formatters flagged for installation
    pub installs: Vec<String>,
    /// `props` values keyed by formatter name, in declaration order
    pub props: Vec<(String, Value)>,
}

impl FormatterSpec {
    pub fn ordered<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormatterSpec::Ordered(
            names
                .into_iter()
                .map(|name| Value::String(name.into()))
                .collect(),
        )
    }

    pub fn keyed<I, K>(declarations: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        FormatterSpec::Keyed(
            declarations
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Check element types and flatten the chain into run order.
    pub fn resolve(&self, file_type: &str) -> Result<ResolvedChain> {
        let mut chain = ResolvedChain::default();

        match self {
            FormatterSpec::Ordered(items) => {
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(name) => chain.names.push(name.clone()),
                        other => {
                            return Err(type_mismatch(
                                file_type,
                                format!("#{}", index + 1),
                                "string",
                                other,
                            ))
                        }
                    }
                }
            }
            FormatterSpec::Keyed(items) => {
                for (name, value) in items {
                    match value {
                        Value::Object(options) => {
                            if options.get("install").is_some_and(is_truthy) {
                                chain.installs.push(name.clone());
                            }
                            if let Some(props) = options.get("props") {
                                chain.props.push((name.clone(), props.clone()));
                            }
                            for key in options.keys() {
                                if key != "install" && key != "props" {
                                    tracing::debug!(
                                        file_type = %file_type,
                                        formatter = %name,
                                        key = %key,
                                        "Ignoring unknown formatter option"
                                    );
                                }
                            }
                            chain.names.push(name.clone());
                        }
                        Value::String(alias) => chain.names.push(alias.clone()),
                        other => {
                            return Err(type_mismatch(
                                file_type,
                                name.clone(),
                                "string or options object",
                                other,
                            ))
                        }
                    }
                }
            }
        }

        Ok(chain)
    }
}

/// `null` and `false` are the only falsy values
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(
    file_type: &str,
    key: String,
    expected: &str,
    actual: &Value,
) -> crate::EdkitError {
    ConfigError::TypeMismatch {
        file_type: file_type.to_string(),
        facet: "formatters".to_string(),
        key,
        expected: expected.to_string(),
        actual: value_type_name(actual).to_string(),
    }
    .into()
}
