// Language registry aggregation tests
// Tests parser, tool, server and formatter collections built from both
// authoring styles

use serde_json::json;
use std::fs;
use tempfile::tempdir;

use edkit::error::{ConfigError, EdkitError};
use edkit::language::{FormatterDecl, FormatterSpec, LanguageRegistry, RegistryBuilder};

// =============================================================================
// PARSER COLLECTION
// =============================================================================

#[test]
fn test_parser_collection_is_unique_and_excludes_other() {
    let mut builder = RegistryBuilder::new();
    builder.register("typescript");
    builder.register("typescriptreact").with_syntax_parser("tsx");
    builder.register("tsx");
    builder.register("other");
    let aggregate = builder.build().aggregate().unwrap();

    assert_eq!(aggregate.parser_list(), vec!["tsx", "typescript"]);
    assert!(!aggregate.parser_installs.contains("other"));
}

#[test]
fn test_entries_without_parser_contribute_their_key() {
    let registry = LanguageRegistry::from_yaml(
        r#"
languages:
  lua: {}
  markdown:
  vue:
    parser: html
"#,
    )
    .unwrap();
    let aggregate = registry.aggregate().unwrap();

    assert!(aggregate.parser_installs.contains("lua"));
    assert!(aggregate.parser_installs.contains("markdown"));
    assert!(aggregate.parser_installs.contains("html"));
    assert!(!aggregate.parser_installs.contains("vue"));
}

// =============================================================================
// FORMATTERS
// =============================================================================

#[test]
fn test_ordered_chain_is_kept_verbatim() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("javascript")
        .with_formatters(FormatterSpec::ordered(["a", "b", "c"]));
    let aggregate = builder.build().aggregate().unwrap();

    assert_eq!(aggregate.formatters_for("javascript"), ["a", "b", "c"]);
    assert!(aggregate.tool_packages.is_empty());
}

#[test]
fn test_install_flag_adds_tool_package() {
    let mut builder = RegistryBuilder::new();
    builder.register("lua").with_formatters(FormatterSpec::keyed([
        ("toolX", FormatterDecl::new().install().into()),
        ("toolY", json!({ "install": false })),
        ("toolZ", json!({})),
    ]));
    let aggregate = builder.build().aggregate().unwrap();

    assert_eq!(aggregate.tool_list(), vec!["toolX"]);
    assert_eq!(aggregate.tool_packages["toolX"], json!({}));
    assert_eq!(aggregate.formatters_for("lua"), ["toolX", "toolY", "toolZ"]);
}

#[test]
fn test_install_flag_keeps_declared_tool_options() {
    let registry = LanguageRegistry::from_yaml(
        r#"
languages:
  python:
    tools:
      ruff: { version: "0.4" }
    formatters:
      ruff:
        install: true
"#,
    )
    .unwrap();
    let aggregate = registry.aggregate().unwrap();

    assert_eq!(aggregate.tool_packages["ruff"], json!({ "version": "0.4" }));
}

#[test]
fn test_props_and_aliases() {
    let registry = LanguageRegistry::from_yaml(
        r#"
languages:
  lua:
    formatters:
      stylua:
        install: true
        props: { indent_width: 2 }
      fmt: stylua_alt
"#,
    )
    .unwrap();
    let aggregate = registry.aggregate().unwrap();

    assert_eq!(aggregate.formatters_for("lua"), ["stylua", "stylua_alt"]);
    assert_eq!(
        aggregate.formatter_options["stylua"],
        json!({ "indent_width": 2 })
    );
}

#[test]
fn test_non_string_ordered_element_names_file_type() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("css")
        .with_formatters(FormatterSpec::Ordered(vec![json!(42)]));
    let err = builder.build().aggregate().unwrap_err();

    match err {
        EdkitError::Config(config_err) => match *config_err {
            ConfigError::TypeMismatch {
                ref file_type,
                ref expected,
                ref actual,
                ..
            } => {
                assert_eq!(file_type, "css");
                assert_eq!(expected, "string");
                assert_eq!(actual, "number");
            }
            ref other => panic!("Expected type mismatch, got {other:?}"),
        },
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[test]
fn test_keyed_number_is_rejected() {
    let registry = LanguageRegistry::from_yaml(
        "languages:\n  sql:\n    formatters:\n      sqlfmt: 3\n",
    )
    .unwrap();
    let err = registry.aggregate().unwrap_err();
    assert!(err.to_string().contains("sql"));
    assert_eq!(err.exit_code(), edkit::exit_codes::CONFIG_ERROR);
}

#[test]
fn test_duplicate_formatters_are_preserved() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("sh")
        .with_formatters(FormatterSpec::ordered(["shfmt", "shfmt"]));
    let aggregate = builder.build().aggregate().unwrap();
    assert_eq!(aggregate.formatters_for("sh"), ["shfmt", "shfmt"]);
}

// =============================================================================
// COLLISIONS
// =============================================================================

#[test]
fn test_later_entry_wins_on_tool_collision() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("javascript")
        .with_tool_packages([("eslint_d", json!({ "version": "1" }))]);
    builder
        .register("typescript")
        .with_tool_packages([("eslint_d", json!({ "version": "2" }))]);
    let aggregate = builder.build().aggregate().unwrap();

    assert_eq!(aggregate.tool_packages["eslint_d"], json!({ "version": "2" }));
}

#[test]
fn test_later_entry_wins_on_server_collision() {
    let registry = LanguageRegistry::from_yaml(
        r#"
languages:
  javascript:
    servers:
      ts_ls: { settings: { a: 1 } }
  typescript:
    servers:
      ts_ls: { settings: { b: 2 } }
"#,
    )
    .unwrap();
    let aggregate = registry.aggregate().unwrap();
    assert_eq!(
        aggregate.server_configs["ts_ls"],
        json!({ "settings": { "b": 2 } })
    );
}

#[test]
fn test_reregistered_file_type_replaces_entry() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("go")
        .with_formatters(FormatterSpec::ordered(["gofmt"]));
    builder.register("rust");
    builder.register("go");
    let registry = builder.build();

    assert_eq!(registry.file_types(), vec!["go", "rust"]);
    let aggregate = registry.aggregate().unwrap();
    assert!(aggregate.formatters_for("go").is_empty());
    assert!(!aggregate.formatters_by_file_type.contains_key("go"));
}

// =============================================================================
// FILE LOADING
// =============================================================================

#[test]
fn test_from_file_and_missing_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("edkit.yaml");
    fs::write(
        &path,
        "languages:\n  other:\n    tools:\n      codespell: {}\n",
    )
    .unwrap();

    let aggregate = LanguageRegistry::from_file(&path)
        .unwrap()
        .aggregate()
        .unwrap();
    assert!(aggregate.parser_installs.is_empty());
    assert_eq!(aggregate.tool_list(), vec!["codespell"]);

    let err = LanguageRegistry::from_file(&temp_dir.path().join("missing.yaml")).unwrap_err();
    assert_eq!(err.exit_code(), edkit::exit_codes::CONFIG_ERROR);
}

#[test]
fn test_unknown_entry_key_is_rejected() {
    let err = LanguageRegistry::from_yaml("languages:\n  go:\n    formater: [gofmt]\n").unwrap_err();
    assert!(matches!(err, EdkitError::Config(_)));
}
