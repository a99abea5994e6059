//! Tests for language server configuration

use std::path::Path;
use std::time::Duration;

use serde_json::json;

use crate::lsp::{DEFAULT_READY_TIMEOUT, LspServerConfig, MAX_HOVER_LENGTH};

#[test]
fn test_default_runs_typescript_language_server() {
    let config = LspServerConfig::default();

    assert_eq!(config.command, "typescript-language-server");
    assert_eq!(config.args, vec!["--stdio"]);
    assert_eq!(config.ready_timeout, DEFAULT_READY_TIMEOUT);
    assert_eq!(
        config.init_options,
        Some(json!({ "preferences": { "maximumHoverLength": MAX_HOVER_LENGTH } }))
    );
}

#[test]
fn test_from_command_line_splits_arguments() {
    let config = LspServerConfig::from_command_line("npx typescript-language-server --stdio")
        .map(|c| c.with_ready_timeout(Duration::from_secs(1)));

    let config = config.as_ref();
    assert_eq!(config.map(|c| c.command.as_str()), Some("npx"));
    assert_eq!(
        config.map(|c| c.args.clone()),
        Some(vec![
            "typescript-language-server".to_string(),
            "--stdio".to_string()
        ])
    );
    assert_eq!(config.map(|c| c.ready_timeout), Some(Duration::from_secs(1)));
}

#[test]
fn test_blank_command_line_is_rejected() {
    assert!(LspServerConfig::from_command_line("   ").is_none());
}

#[test]
fn test_typescript_lib_sets_tsserver_path() {
    let config = LspServerConfig::default()
        .with_root("/project")
        .with_typescript_lib(Path::new("/project/node_modules/typescript/lib"));

    assert_eq!(config.root_path, Path::new("/project"));
    assert_eq!(
        config.init_options,
        Some(json!({
            "preferences": { "maximumHoverLength": MAX_HOVER_LENGTH },
            "tsserver": { "path": "/project/node_modules/typescript/lib" }
        }))
    );
}

#[test]
fn test_typescript_lib_keeps_other_options() {
    let mut config = LspServerConfig::default();
    config.init_options = Some(json!({ "preferences": { "quoteStyle": "single" } }));

    let config = config.with_typescript_lib(Path::new("/lib"));

    assert_eq!(
        config.init_options,
        Some(json!({
            "preferences": { "quoteStyle": "single" },
            "tsserver": { "path": "/lib" }
        }))
    );
}

#[test]
fn test_explicit_tsserver_path_wins() {
    let mut config = LspServerConfig::default();
    config.init_options = Some(json!({ "tsserver": { "path": "/custom" } }));

    let config = config.with_typescript_lib(Path::new("/lib"));

    assert_eq!(
        config.init_options,
        Some(json!({ "tsserver": { "path": "/custom" } }))
    );
}
