// Sample configuration command implementation
// Generates a starter edkit.yaml for the languages found in a project

use crate::config::Config;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SampleConfigConfig {
    /// Languages to include; detected from `project_dir` when empty
    pub languages: Vec<String>,
    pub project_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SampleConfigResult {
    pub config_generated: String,
    pub languages: Vec<String>,
    pub output_location: String,
}

const OTHER_SNIPPET: &str = "  other:
    tools:
      codespell: {}
    formatters:
      codespell: {}
";

// (language, manifest files, source extensions, snippet)
const LANGUAGE_TEMPLATES: &[(&str, &[&str], &[&str], &str)] = &[
    (
        "lua",
        &[".luarc.json", "stylua.toml", ".stylua.toml"],
        &["lua"],
        "  lua:
    tools:
      lua-language-server: {}
    servers:
      lua_ls:
        settings:
          Lua:
            diagnostics:
              globals: [vim]
    formatters:
      stylua:
        install: true
",
    ),
    (
        "rust",
        &["Cargo.toml"],
        &["rs"],
        "  rust:
    tools:
      rust-analyzer: {}
    servers:
      rust_analyzer:
        settings:
          rust-analyzer:
            check:
              command: clippy
    formatters: [rustfmt]
",
    ),
    (
        "typescript",
        &["package.json", "tsconfig.json"],
        &["ts", "tsx", "js", "jsx"],
        "  typescript:
    tools:
      typescript-language-server: {}
    servers:
      ts_ls: {}
    formatters:
      prettierd:
        install: true
  typescriptreact:
    parser: tsx
    formatters: [prettierd]
",
    ),
    (
        "go",
        &["go.mod"],
        &["go"],
        "  go:
    tools:
      gopls: {}
    servers:
      gopls:
        settings:
          gopls:
            gofumpt: true
    formatters:
      goimports:
        install: true
      gofumpt:
        install: true
",
    ),
    (
        "python",
        &["pyproject.toml", "setup.py", "requirements.txt"],
        &["py"],
        "  python:
    tools:
      pyright: {}
    servers:
      pyright: {}
    formatters:
      ruff_organize_imports: {}
      ruff_format:
        install: true
",
    ),
];

pub fn execute_sample_config_command(config: &SampleConfigConfig) -> Result<SampleConfigResult> {
    info!("Generating sample configuration");

    let languages = if config.languages.is_empty() {
        let dir = match &config.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        detect_project_languages(&dir)
    } else {
        config.languages.clone()
    };

    let config_content = generate_config_content(&languages);

    // The sample must load cleanly
    Config::from_yaml(&config_content)?;

    let output_location = if let Some(ref output_file) = config.output_file {
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_file, &config_content)?;
        output_file.to_string_lossy().to_string()
    } else {
        "stdout".to_string()
    };

    Ok(SampleConfigResult {
        config_generated: config_content,
        languages,
        output_location,
    })
}

/// Template languages present in `dir`, by manifest or by source files
pub fn detect_project_languages(dir: &Path) -> Vec<String> {
    LANGUAGE_TEMPLATES
        .iter()
        .filter(|(_, manifests, extensions, _)| {
            manifests.iter().any(|m| dir.join(m).exists()) || has_source_files(dir, extensions, 0)
        })
        .map(|(language, ..)| language.to_string())
        .collect()
}

fn has_source_files(dir: &Path, extensions: &[&str], depth: usize) -> bool {
    if depth > 3 {
        return false;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_file() {
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext));
            if matches {
                return true;
            }
        } else if file_type.is_dir() {
            let skip = matches!(
                entry.file_name().to_str(),
                Some("target" | "node_modules" | ".git" | "__pycache__" | ".venv" | "venv")
            );
            if !skip && has_source_files(&path, extensions, depth + 1) {
                return true;
            }
        }
    }
    false
}

fn generate_config_content(languages: &[String]) -> String {
    let mut content = String::from("# edkit language registry\nlanguages:\n");

    for language in languages {
        match LANGUAGE_TEMPLATES
            .iter()
            .find(|(name, ..)| *name == language.as_str())
        {
            Some((.., snippet)) => content.push_str(snippet),
            None => {
                tracing::warn!(language = %language, "No template, adding empty entry");
                content.push_str(&format!("  {language}: {{}}\n"));
            }
        }
    }
    content.push_str(OTHER_SNIPPET);

    content.push_str("multiplexer:\n  program: tmux\n  session: edkit\n");
    content
}
