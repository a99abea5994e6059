//! Clipboard and notification sinks for the terminal

use std::process::Stdio;

use async_trait::async_trait;
use futures::AsyncWriteExt;
use typegrab_core::{Clipboard, Notifier};

/// Prints copied text on stdout
#[derive(Debug, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write(&self, text: &str) {
        println!("{text}");
    }
}

/// Drops copied text; `serve` returns it in the response instead
#[derive(Debug, Default)]
pub struct DiscardClipboard;

#[async_trait]
impl Clipboard for DiscardClipboard {
    async fn write(&self, _text: &str) {}
}

/// Pipes copied text into an external command such as `pbcopy` or
/// `xclip -selection clipboard`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Returns `None` for a blank command line
    #[must_use]
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    async fn pipe(&self, text: &str) -> anyhow::Result<()> {
        let mut child = async_process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to open stdin of {}", self.program))?;
        stdin.write_all(text.as_bytes()).await?;
        stdin.close().await?;
        drop(stdin);

        let status = child.status().await?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write(&self, text: &str) {
        if let Err(e) = self.pipe(text).await {
            tracing::warn!("Clipboard write failed: {:#}", e);
        }
    }
}

/// Reports notifications on stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
