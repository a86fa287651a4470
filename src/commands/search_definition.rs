// Search for the definition of the command a file is named after

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editor::{report, EditorHost, NotifyLevel};
use crate::error::{ConfigError, EdkitError, LookupError, Result};

const TEST_SUFFIXES: &[&str] = &["_spec", "_test"];

const DEFINITION_KEYWORDS: &str =
    "function|fn|def|defp|class|const|let|var|type|interface|struct|enum|module|defmodule|alias";

#[derive(Debug, Clone)]
pub struct SearchDefinitionConfig {
    /// File the search term is derived from
    pub path: PathBuf,
    /// Project root to search
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionMatch {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    pub text: String,
}

/// Name a file stands for: its stem without test markers, e.g.
/// `deploy-app.spec.ts` -> `deploy-app`, `test_sync.py` -> `sync`
pub fn search_term(path: &Path) -> Result<String> {
    let no_term = || {
        EdkitError::from(LookupError::NoSearchTerm {
            path: path.to_path_buf(),
        })
    };

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(no_term)?;
    let mut stem = match name.split_once('.') {
        // dotfile such as `.bashrc`
        Some(("", rest)) if !rest.contains('.') => rest,
        Some((stem, _)) => stem,
        None => name,
    };

    for suffix in TEST_SUFFIXES {
        if let Some(stripped) = stem.strip_suffix(suffix) {
            stem = stripped;
        }
    }
    if let Some(stripped) = stem.strip_prefix("test_") {
        stem = stripped;
    }

    if stem.chars().any(|c| c.is_alphanumeric()) {
        Ok(stem.to_string())
    } else {
        Err(no_term())
    }
}

fn definition_pattern(term: &str) -> Result<Regex> {
    let term = regex::escape(term);
    let pattern = format!(
        r#"^\s*(?:export\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:{DEFINITION_KEYWORDS})\s+{term}\b|^\s*["']?{term}["']?\s*:"#
    );
    Regex::new(&pattern).map_err(|e| {
        EdkitError::Config(Box::new(ConfigError::InvalidValue {
            message: e.to_string(),
            field: "search.term".to_string(),
            value: term,
            expected: "searchable name".to_string(),
            file_path: None,
        }))
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Every line under `root` that defines `term`, skipping `exclude`.
/// Ignore files are honored; unreadable or binary files are skipped.
pub fn find_definitions(
    root: &Path,
    term: &str,
    exclude: Option<&Path>,
) -> Result<Vec<DefinitionMatch>> {
    let pattern = definition_pattern(term)?;
    let mut matches = Vec::new();

    for entry in WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if exclude.is_some_and(|excluded| same_file(path, excluded)) {
            continue;
        }

        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        for (index, line) in content.lines().enumerate() {
            if pattern.is_match(line) {
                matches.push(DefinitionMatch {
                    path: path.to_path_buf(),
                    line: index + 1,
                    text: line.trim().to_string(),
                });
            }
        }
    }

    matches.sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
    Ok(matches)
}

fn search(config: &SearchDefinitionConfig) -> Result<Vec<DefinitionMatch>> {
    let term = search_term(&config.path)?;
    info!(term = %term, root = %config.root.display(), "Searching for definition");

    let matches = find_definitions(&config.root, &term, Some(&config.path))?;
    if matches.is_empty() {
        return Err(LookupError::NoDefinition {
            term,
            root: config.root.clone(),
        }
        .into());
    }
    Ok(matches)
}

/// Open the first definition found; misses are reported, not raised
pub fn execute_search_definition_command(
    host: &mut dyn EditorHost,
    config: &SearchDefinitionConfig,
) -> Result<Option<Vec<DefinitionMatch>>> {
    let found = report(host, search(config))?;
    if let Some(matches) = &found {
        let first = &matches[0];
        host.open(&first.path)?;
        host.notify(
            NotifyLevel::Info,
            &format!(
                "{}:{} ({} definition{})",
                first.path.display(),
                first.line,
                matches.len(),
                if matches.len() == 1 { "" } else { "s" }
            ),
        );
    }
    Ok(found)
}
