//! Integration tests against a real TypeScript language server
//!
//! These tests require `typescript-language-server` (and `typescript`) on
//! PATH and are skipped otherwise.

use std::fs;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;
use typegrab_core::{
    Clipboard, CommandOutcome, CopierConfig, EditorSnapshot, LspBackend, Notifier, Position,
    TypeCopier,
};

/// Helper to check if a command exists on PATH
fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[derive(Default)]
struct MemoryClipboard(Mutex<Vec<String>>);

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

struct Silent;

impl Notifier for Silent {
    fn info(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

fn write_project(dir: &TempDir, source: &str) -> std::path::PathBuf {
    fs::write(
        dir.path().join("tsconfig.json"),
        r#"{ "compilerOptions": { "strict": true, "target": "ES2020" } }"#,
    )
    .unwrap();
    let file = dir.path().join("main.ts");
    fs::write(&file, source).unwrap();
    file
}

#[tokio::test]
async fn test_copy_object_type_from_server() -> anyhow::Result<()> {
    if !command_exists("typescript-language-server") {
        eprintln!("Skipping test: typescript-language-server not found");
        return Ok(());
    }

    let temp = TempDir::new()?;
    let source = "const x: { a: number; b: string } = { a: 1, b: \"x\" };\n";
    let file = write_project(&temp, source);
    let copier = TypeCopier::new(
        LspBackend::default(),
        CopierConfig::default().with_workspace(temp.path()),
    );
    let clipboard = MemoryClipboard::default();

    let editor = EditorSnapshot::new(&file, source, Position::new(0, 6));
    let outcome = copier
        .copy_type_at_cursor(Some(&editor), &clipboard, &Silent)
        .await;
    copier.shutdown().await?;

    match outcome {
        CommandOutcome::Copied(text) => {
            assert!(text.contains("a: number"), "unexpected type: {text}");
            assert!(text.contains("b: string"), "unexpected type: {text}");
        }
        other => panic!("expected a copied type, got {other:?}"),
    }
    assert_eq!(clipboard.0.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_function_type_is_rendered_as_arrow() -> anyhow::Result<()> {
    if !command_exists("typescript-language-server") {
        eprintln!("Skipping test: typescript-language-server not found");
        return Ok(());
    }

    let temp = TempDir::new()?;
    let source = "function twice(n: number): number {\n  return n * 2;\n}\ntwice(2);\n";
    let file = write_project(&temp, source);
    let copier = TypeCopier::new(
        LspBackend::default(),
        CopierConfig::default().with_workspace(temp.path()),
    );

    let editor = EditorSnapshot::new(&file, source, Position::new(3, 1));
    let outcome = copier
        .copy_type_at_cursor(Some(&editor), &MemoryClipboard::default(), &Silent)
        .await;
    copier.shutdown().await?;

    assert_eq!(
        outcome,
        CommandOutcome::Copied("(n: number) => number".to_string())
    );
    Ok(())
}
