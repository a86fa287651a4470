// Companion files: test <-> implementation and markup <-> logic switching
// by path rewriting

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::{report, EditorHost, NotifyLevel};
use crate::error::{ConfigError, EdkitError, LookupError, Result};

/// Which pairing to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionKind {
    /// Test file <-> implementation file
    Test,
    /// Markup (template) file <-> logic file
    Markup,
}

/// One rewrite: a path matching `pattern` pairs with the first existing
/// candidate produced by `replacements`
#[derive(Debug, Clone)]
pub struct CompanionRule {
    pattern: Regex,
    replacements: Vec<String>,
    companion: String,
}

/// User-declared rule as written in the configuration file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompanionRuleConfig {
    /// Regex matched against the whole path
    pub pattern: String,
    /// Candidate paths, using `$name`/`${name}` capture references
    pub replace: Vec<String>,
    /// Name of the companion in messages, e.g. "implementation"
    pub companion: String,
}

/// Extra rules, tried before the built-in ones
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanionConfig {
    pub test: Vec<CompanionRuleConfig>,
    pub markup: Vec<CompanionRuleConfig>,
}

// Test files first: `Foo.spec.ts` also matches the implementation pattern.
const TEST_RULES: &[(&str, &[&str], &str)] = &[
    (
        r"^(?P<stem>.+)\.(?:spec|test)\.(?P<ext>[cm]?[jt]sx?)$",
        &["${stem}.${ext}"],
        "implementation",
    ),
    (r"^(?P<stem>.+)_test\.go$", &["${stem}.go"], "implementation"),
    (
        r"^(?P<root>.*/)?tests/test_(?P<name>[^/]+)\.py$",
        &["${root}${name}.py", "${root}tests/${name}.py"],
        "implementation",
    ),
    (
        r"^(?P<dir>.*/)?test_(?P<name>[^/]+)\.py$",
        &["${dir}${name}.py"],
        "implementation",
    ),
    (
        r"^(?P<root>.*/)?spec/(?P<rest>.+)_spec\.rb$",
        &["${root}lib/${rest}.rb", "${root}app/${rest}.rb"],
        "implementation",
    ),
    (
        r"^(?P<root>.*/)?test/(?P<rest>.+)_test\.exs$",
        &["${root}lib/${rest}.ex"],
        "implementation",
    ),
    (
        r"^(?P<root>.*/)?tests/(?P<rest>.+)\.rs$",
        &["${root}src/${rest}.rs", "${root}src/${rest}/mod.rs"],
        "implementation",
    ),
    (
        r"^(?P<stem>.+)\.(?P<ext>[cm]?[jt]sx?)$",
        &["${stem}.spec.${ext}", "${stem}.test.${ext}"],
        "test",
    ),
    (r"^(?P<stem>.+)\.go$", &["${stem}_test.go"], "test"),
    (
        r"^(?P<dir>.*/)?(?P<name>[^/]+)\.py$",
        &["${dir}test_${name}.py", "${dir}tests/test_${name}.py"],
        "test",
    ),
    (
        r"^(?P<root>.*/)?(?:lib|app)/(?P<rest>.+)\.rb$",
        &["${root}spec/${rest}_spec.rb"],
        "test",
    ),
    (
        r"^(?P<root>.*/)?lib/(?P<rest>.+)\.ex$",
        &["${root}test/${rest}_test.exs"],
        "test",
    ),
    (
        r"^(?P<root>.*/)?src/(?P<rest>.+?)(?:/mod)?\.rs$",
        &["${root}tests/${rest}.rs"],
        "test",
    ),
];

const MARKUP_RULES: &[(&str, &[&str], &str)] = &[
    (
        r"^(?P<stem>.+)\.component\.html$",
        &["${stem}.component.ts"],
        "logic",
    ),
    (
        r"^(?P<stem>.+)\.component\.ts$",
        &["${stem}.component.html"],
        "markup",
    ),
    (r"^(?P<stem>.+)\.html$", &["${stem}.ts", "${stem}.js"], "logic"),
    (r"^(?P<stem>.+)\.(?:ts|js)$", &["${stem}.html"], "markup"),
];

impl CompanionRule {
    pub fn new(pattern: &str, replacements: &[&str], companion: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            EdkitError::Config(Box::new(ConfigError::InvalidValue {
                message: e.to_string(),
                field: "companions.pattern".to_string(),
                value: pattern.to_string(),
                expected: "regular expression".to_string(),
                file_path: None,
            }))
        })?;

        Ok(Self {
            pattern,
            replacements: replacements.iter().map(|r| r.to_string()).collect(),
            companion: companion.to_string(),
        })
    }

    pub fn companion(&self) -> &str {
        &self.companion
    }

    /// Candidate companion paths for `path`, or `None` if the rule does not apply
    pub fn candidates(&self, path: &str) -> Option<Vec<PathBuf>> {
        let captures = self.pattern.captures(path)?;
        Some(
            self.replacements
                .iter()
                .map(|replacement| {
                    let mut rewritten = String::new();
                    captures.expand(replacement, &mut rewritten);
                    PathBuf::from(rewritten)
                })
                .collect(),
        )
    }
}

/// Ordered rule list for one kind; the first matching rule decides
#[derive(Debug, Clone)]
pub struct CompanionRules {
    kind: CompanionKind,
    rules: Vec<CompanionRule>,
}

impl CompanionRules {
    pub fn builtin(kind: CompanionKind) -> Result<Self> {
        Self::with_config(kind, &CompanionConfig::default())
    }

    /// Configured rules followed by the built-in ones
    pub fn with_config(kind: CompanionKind, config: &CompanionConfig) -> Result<Self> {
        let (custom, builtin) = match kind {
            CompanionKind::Test => (&config.test, TEST_RULES),
            CompanionKind::Markup => (&config.markup, MARKUP_RULES),
        };

        let mut rules = Vec::with_capacity(custom.len() + builtin.len());
        for rule in custom {
            let replacements: Vec<&str> = rule.replace.iter().map(String::as_str).collect();
            rules.push(CompanionRule::new(
                &rule.pattern,
                &replacements,
                &rule.companion,
            )?);
        }
        for (pattern, replacements, companion) in builtin {
            rules.push(CompanionRule::new(pattern, replacements, companion)?);
        }

        Ok(Self { kind, rules })
    }

    /// Companion of `path` according to the first matching rule, choosing
    /// the first candidate for which `exists` holds.
    pub fn resolve_with<F>(&self, path: &Path, exists: F) -> Result<PathBuf>
    where
        F: Fn(&Path) -> bool,
    {
        let path_str = path.to_string_lossy().replace('\\', "/");

        let (rule, candidates) = self
            .rules
            .iter()
            .find_map(|rule| rule.candidates(&path_str).map(|c| (rule, c)))
            .ok_or_else(|| LookupError::UnknownFileType {
                path: path.to_path_buf(),
            })?;

        debug!(
            kind = ?self.kind,
            path = %path.display(),
            companion = %rule.companion(),
            candidates = ?candidates,
            "Companion rule matched"
        );

        match candidates.iter().find(|candidate| exists(candidate.as_path())) {
            Some(found) => Ok(found.clone()),
            None => Err(LookupError::NoCompanion {
                path: path.to_path_buf(),
                companion: rule.companion().to_string(),
                candidates,
            }
            .into()),
        }
    }

    /// Companion of `path` that exists on disk
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        self.resolve_with(path, Path::is_file)
    }
}

/// Switch the editor to the companion of `path`. Lookup misses are reported
/// to the user and leave the editor untouched; files are never created.
pub fn toggle_companion(
    host: &mut dyn EditorHost,
    rules: &CompanionRules,
    path: &Path,
) -> Result<Option<PathBuf>> {
    let resolved = report(host, rules.resolve(path))?;
    if let Some(companion) = &resolved {
        host.open(companion)?;
        host.notify(
            NotifyLevel::Info,
            &format!("Switched to {}", companion.display()),
        );
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::RecordingHost;
    use std::collections::HashSet;

    fn exists_in(files: &[&str]) -> impl Fn(&Path) -> bool {
        let files: HashSet<PathBuf> = files.iter().map(PathBuf::from).collect();
        move |path: &Path| files.contains(path)
    }

    fn test_rules() -> CompanionRules {
        CompanionRules::builtin(CompanionKind::Test).unwrap()
    }

    #[test]
    fn test_spec_to_implementation() {
        let found = test_rules()
            .resolve_with(
                Path::new("src/Foo.spec.ts"),
                exists_in(&["src/Foo.ts", "src/Foo.spec.ts"]),
            )
            .unwrap();
        assert_eq!(found, PathBuf::from("src/Foo.ts"));
    }

    #[test]
    fn test_implementation_prefers_existing_test_suffix() {
        let found = test_rules()
            .resolve_with(
                Path::new("web/app.tsx"),
                exists_in(&["web/app.tsx", "web/app.test.tsx"]),
            )
            .unwrap();
        assert_eq!(found, PathBuf::from("web/app.test.tsx"));
    }

    #[test]
    fn test_go_pairs() {
        let rules = test_rules();
        let files = ["pkg/server.go", "pkg/server_test.go"];
        assert_eq!(
            rules
                .resolve_with(Path::new("pkg/server_test.go"), exists_in(&files))
                .unwrap(),
            PathBuf::from("pkg/server.go")
        );
        assert_eq!(
            rules
                .resolve_with(Path::new("pkg/server.go"), exists_in(&files))
                .unwrap(),
            PathBuf::from("pkg/server_test.go")
        );
    }

    #[test]
    fn test_ruby_rewrites_path_fragment() {
        let found = test_rules()
            .resolve_with(
                Path::new("/proj/spec/models/user_spec.rb"),
                exists_in(&["/proj/app/models/user.rb"]),
            )
            .unwrap();
        assert_eq!(found, PathBuf::from("/proj/app/models/user.rb"));
    }

    #[test]
    fn test_python_prefix() {
        let found = test_rules()
            .resolve_with(
                Path::new("pkg/test_parser.py"),
                exists_in(&["pkg/parser.py"]),
            )
            .unwrap();
        assert_eq!(found, PathBuf::from("pkg/parser.py"));
    }

    #[test]
    fn test_missing_implementation_is_lookup_miss() {
        let err = test_rules()
            .resolve_with(Path::new("src/Foo.spec.ts"), exists_in(&[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Lookup failed: No implementation file: src/Foo.spec.ts");
    }

    #[test]
    fn test_unknown_file_type() {
        let err = test_rules()
            .resolve_with(Path::new("notes.txt"), exists_in(&[]))
            .unwrap_err();
        assert!(matches!(
            err,
            EdkitError::Lookup(ref e) if matches!(**e, LookupError::UnknownFileType { .. })
        ));
    }

    #[test]
    fn test_markup_pairs() {
        let rules = CompanionRules::builtin(CompanionKind::Markup).unwrap();
        let files = ["app/list.component.html", "app/list.component.ts"];
        assert_eq!(
            rules
                .resolve_with(Path::new("app/list.component.html"), exists_in(&files))
                .unwrap(),
            PathBuf::from("app/list.component.ts")
        );
        assert_eq!(
            rules
                .resolve_with(Path::new("app/list.component.ts"), exists_in(&files))
                .unwrap(),
            PathBuf::from("app/list.component.html")
        );
    }

    #[test]
    fn test_configured_rules_take_precedence() {
        let config = CompanionConfig {
            test: vec![CompanionRuleConfig {
                pattern: r"^(?P<stem>.+)\.spec\.ts$".to_string(),
                replace: vec!["${stem}.impl.ts".to_string()],
                companion: "implementation".to_string(),
            }],
            markup: vec![],
        };
        let rules = CompanionRules::with_config(CompanionKind::Test, &config).unwrap();
        let found = rules
            .resolve_with(Path::new("a.spec.ts"), exists_in(&["a.impl.ts", "a.ts"]))
            .unwrap();
        assert_eq!(found, PathBuf::from("a.impl.ts"));
    }

    #[test]
    fn test_invalid_configured_pattern() {
        let config = CompanionConfig {
            test: vec![CompanionRuleConfig {
                pattern: "(".to_string(),
                replace: vec![],
                companion: "implementation".to_string(),
            }],
            markup: vec![],
        };
        let err = CompanionRules::with_config(CompanionKind::Test, &config).unwrap_err();
        assert!(matches!(err, EdkitError::Config(_)));
    }

    #[test]
    fn test_toggle_without_companion_leaves_editor_alone() {
        let mut host = RecordingHost::new();
        let outcome = toggle_companion(
            &mut host,
            &test_rules(),
            Path::new("/definitely/missing/Foo.spec.ts"),
        )
        .unwrap();
        assert!(outcome.is_none());
        assert!(host.untouched());
        assert!(host.messages[0].1.contains("No implementation file"));
    }
}
