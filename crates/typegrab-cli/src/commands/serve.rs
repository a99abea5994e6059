//! `serve`: answer copy requests with one long-lived copier
//!
//! Each input line is a JSON request such as
//! `{"command": "copyTypeAtCursor", "file": "src/a.ts", "line": 3, "character": 7}`
//! (`endLine`/`endCharacter` select a range). Each answer is one JSON line:
//! `{"status": "copied", "text": "..."}`, or `warning`/`error` with a
//! `message`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use typegrab_core::{Clipboard, CommandKind, CommandOutcome, EngineBackend, Notifier, TypeCopier};

use super::copy::{build_copier, command_clipboard, copy_at};
use crate::cli::{ServeArgs, TargetArgs};
use crate::sinks::{ConsoleNotifier, DiscardClipboard};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    /// Command id; `copyTypeAtCursor` when omitted
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(flatten)]
    pub target: TargetArgs,
}

fn default_command() -> String {
    CommandKind::CopyTypeAtCursor.id().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Copied { text: String },
    Warning { message: String },
    Error { message: String },
}

impl From<CommandOutcome> for Response {
    fn from(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Copied(text) => Self::Copied { text },
            CommandOutcome::Warning(message) => Self::Warning { message },
            CommandOutcome::Error(message) => Self::Error { message },
        }
    }
}

/// Look up a command by its id
#[must_use]
pub fn command_kind(id: &str) -> Option<CommandKind> {
    [CommandKind::CopyTypeAtCursor, CommandKind::CopyVariableType]
        .into_iter()
        .find(|kind| kind.id() == id)
}

/// Serve stdin until it closes, then shut the language server down
///
/// # Errors
/// Returns an error if the session arguments are invalid or stdio fails.
pub async fn run(args: &ServeArgs) -> Result<()> {
    let copier = build_copier(&args.session)?;
    let clipboard: Box<dyn Clipboard> =
        match command_clipboard(args.session.clipboard_cmd.as_deref())? {
            Some(sink) => Box::new(sink),
            None => Box::new(DiscardClipboard),
        };

    let input = BufReader::new(tokio::io::stdin());
    let result = serve(
        &copier,
        input,
        tokio::io::stdout(),
        clipboard.as_ref(),
        &ConsoleNotifier,
    )
    .await;

    if let Err(e) = copier.shutdown().await {
        tracing::warn!("Language server did not shut down cleanly: {:#}", e);
    }
    let handled = result?;
    tracing::info!("Served {} requests", handled);
    Ok(())
}

/// Answer every request line of `input` on `output`, returning how many
/// requests were handled
///
/// # Errors
/// Returns an error only if reading `input` or writing `output` fails; bad
/// requests get an error response.
pub async fn serve<B, R, W>(
    copier: &TypeCopier<B>,
    input: R,
    mut output: W,
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
) -> Result<usize>
where
    B: EngineBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = answer(copier, line, clipboard, notifier).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        output.write_all(encoded.as_bytes()).await?;
        output.flush().await?;
        handled += 1;
    }
    Ok(handled)
}

async fn answer<B: EngineBackend>(
    copier: &TypeCopier<B>,
    line: &str,
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
) -> Response {
    let request = match serde_json::from_str::<CopyRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Rejecting request {:?}", line);
            return Response::Error {
                message: format!("invalid request: {e}"),
            };
        }
    };
    let Some(kind) = command_kind(&request.command) else {
        return Response::Error {
            message: format!("unknown command: {}", request.command),
        };
    };
    copy_at(copier, kind, &request.target, clipboard, notifier)
        .await
        .into()
}
