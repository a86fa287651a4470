// Per-file-type language declaration

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::formatter::FormatterSpec;

/// Tool or server name to its opaque options object
pub type Options = Map<String, Value>;

/// File type reserved for global tools; it never names a syntax parser
pub const OTHER_FILE_TYPE: &str = "other";

/// Everything one file type declares. Every facet is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageEntry {
    #[serde(skip)]
    file_type: String,

    #[serde(rename = "parser", default, skip_serializing_if = "Option::is_none")]
    pub syntax_parser: Option<String>,

    #[serde(rename = "tools", default, skip_serializing_if = "Option::is_none")]
    pub tool_packages: Option<Options>,

    #[serde(rename = "servers", default, skip_serializing_if = "Option::is_none")]
    pub server_config: Option<Options>,

    #[serde(rename = "formatters", default, skip_serializing_if = "Option::is_none")]
    pub formatter_chain: Option<FormatterSpec>,
}

impl LanguageEntry {
    pub fn new(file_type: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            ..Self::default()
        }
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub(crate) fn set_file_type(&mut self, file_type: String) {
        self.file_type = file_type;
    }

    /// Parser to install: the explicit one, else the file type itself.
    /// `None` for the reserved `other` entry.
    pub fn parser_name(&self) -> Option<&str> {
        if self.file_type == OTHER_FILE_TYPE {
            return None;
        }
        Some(self.syntax_parser.as_deref().unwrap_or(&self.file_type))
    }

    pub fn with_syntax_parser(&mut self, name: impl Into<String>) -> &mut Self {
        self.syntax_parser = Some(name.into());
        self
    }

    pub fn with_tool_packages<I, K>(&mut self, tools: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.tool_packages = Some(collect_options(tools));
        self
    }

    pub fn with_server_config<I, K>(&mut self, servers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.server_config = Some(collect_options(servers));
        self
    }

    pub fn with_formatters(&mut self, spec: FormatterSpec) -> &mut Self {
        self.formatter_chain = Some(spec);
        self
    }
}

fn collect_options<I, K>(items: I) -> Options
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    items.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
