//! `copy-type`: resolve the type at a position in a file on disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use typegrab_core::{
    Clipboard, CommandKind, CommandOutcome, CopierConfig, EditorSnapshot, EngineBackend,
    LspBackend, LspServerConfig, Notifier, Position, TypeCopier,
};

use crate::cli::{CopyArgs, SessionArgs, TargetArgs};
use crate::sinks::{CommandClipboard, ConsoleNotifier, StdoutClipboard};

/// Run one copy command and shut the language server down afterwards
///
/// # Errors
/// Returns an error if the session arguments are invalid. Everything that
/// goes wrong with the target itself is reported through the outcome.
pub async fn run(kind: CommandKind, args: &CopyArgs) -> Result<CommandOutcome> {
    let copier = build_copier(&args.session)?;
    let clipboard: Box<dyn Clipboard> =
        match command_clipboard(args.session.clipboard_cmd.as_deref())? {
            Some(sink) => Box::new(sink),
            None => Box::new(StdoutClipboard),
        };

    let outcome = copy_at(
        &copier,
        kind,
        &args.target,
        clipboard.as_ref(),
        &ConsoleNotifier,
    )
    .await;

    if let Err(e) = copier.shutdown().await {
        tracing::warn!("Language server did not shut down cleanly: {:#}", e);
    }
    Ok(outcome)
}

/// Read `target` from disk and run `kind` on it.
///
/// A file that cannot be read is reported as an error outcome, the same way
/// the copier reports a missing editor.
pub async fn copy_at<B: EngineBackend>(
    copier: &TypeCopier<B>,
    kind: CommandKind,
    target: &TargetArgs,
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
) -> CommandOutcome {
    match build_editor(target) {
        Ok(editor) => copier.run(kind, Some(&editor), clipboard, notifier).await,
        Err(e) => {
            let message = format!("{e:#}");
            notifier.error(&message);
            CommandOutcome::Error(message)
        }
    }
}

/// A copier over the language server named by `session`
///
/// # Errors
/// Returns an error if `--server` is blank.
pub fn build_copier(session: &SessionArgs) -> Result<TypeCopier<LspBackend>> {
    let backend = LspBackend::new(server_config(session.server.as_deref())?);
    Ok(TypeCopier::new(backend, build_config(session)))
}

/// Snapshot of `target.file` as an editor would present it
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn build_editor(target: &TargetArgs) -> Result<EditorSnapshot> {
    let path = absolute(&target.file)?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let cursor = Position::new(target.line, target.character);
    let editor = EditorSnapshot::new(path, text, cursor);
    Ok(match (target.end_line, target.end_character) {
        (Some(line), Some(character)) => {
            editor.with_selection(cursor, Position::new(line, character))
        }
        _ => editor,
    })
}

#[must_use]
pub fn build_config(session: &SessionArgs) -> CopierConfig {
    let mut config = CopierConfig::default()
        .with_preset(session.render)
        .with_tolerance(session.tolerance)
        .with_walk(session.walk.into());
    if let Some(workspace) = &session.workspace {
        config = config.with_workspace(workspace);
    }
    config
}

/// Server configuration from an optional `--server` command line
///
/// # Errors
/// Returns an error if the command line is blank.
pub fn server_config(command_line: Option<&str>) -> Result<LspServerConfig> {
    match command_line {
        Some(line) => LspServerConfig::from_command_line(line)
            .ok_or_else(|| anyhow::anyhow!("--server needs a command")),
        None => Ok(LspServerConfig::default()),
    }
}

/// The `--clipboard-cmd` sink, if one was given
///
/// # Errors
/// Returns an error if the command line is blank.
pub fn command_clipboard(command_line: Option<&str>) -> Result<Option<CommandClipboard>> {
    command_line
        .map(|line| {
            CommandClipboard::from_command_line(line)
                .ok_or_else(|| anyhow::anyhow!("--clipboard-cmd needs a command"))
        })
        .transpose()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))
}
