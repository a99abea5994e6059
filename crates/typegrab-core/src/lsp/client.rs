//! LSP Client: Communicates with the language server using async-lsp

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_lsp::concurrency::ConcurrencyLayer;
use async_lsp::panic::CatchUnwindLayer;
use async_lsp::tracing::TracingLayer;
use async_lsp::{LanguageServer, ServerSocket};
// Use lsp_types re-exported from async_lsp to avoid version mismatch
use async_lsp::lsp_types::{
    ClientCapabilities, DidChangeTextDocumentParams, DidOpenTextDocumentParams,
    HoverClientCapabilities, HoverContents, HoverParams, InitializeParams, InitializedParams,
    MarkedString, MarkupKind, Position as LspPosition, SelectionRange,
    SelectionRangeClientCapabilities, SelectionRangeParams, TextDocumentClientCapabilities,
    TextDocumentContentChangeEvent, TextDocumentIdentifier, TextDocumentItem,
    TextDocumentPositionParams, Url, VersionedTextDocumentIdentifier, WindowClientCapabilities,
    WorkspaceFolder,
};
use futures::channel::oneshot;
use tower::ServiceBuilder;

use super::config::LspServerConfig;
use super::state::{ClientState, Stop};
use crate::line_index::Position;

/// How long shutdown waits for the mainloop to drain
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Client for communicating with an LSP server using async-lsp
pub struct LspClient {
    server: ServerSocket,
    mainloop_handle: tokio::task::JoinHandle<()>,
    #[allow(dead_code)]
    child: async_process::Child,
    ready_rx: Option<oneshot::Receiver<()>>,
    config: LspServerConfig,
}

impl LspClient {
    /// Start an LSP server and create a client
    ///
    /// # Errors
    /// Returns an error if the server cannot be started.
    pub async fn start(config: LspServerConfig) -> Result<Self> {
        let (ready_tx, ready_rx) = oneshot::channel();

        let (mainloop, server) = async_lsp::MainLoop::new_client(|_server| {
            ServiceBuilder::new()
                .layer(TracingLayer::default())
                .layer(CatchUnwindLayer::default())
                .layer(ConcurrencyLayer::default())
                .service(ClientState::new_router(ready_tx))
        });

        let mut child = async_process::Command::new(&config.command)
            .args(&config.args)
            .current_dir(&config.root_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow!("Failed to start {}: {}", config.command, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Failed to get stdout from LSP process"))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Failed to get stdin from LSP process"))?;

        // Run the mainloop in a background task
        let mainloop_handle = tokio::spawn(async move {
            if let Err(e) = mainloop.run_buffered(stdout, stdin).await {
                tracing::warn!("LSP mainloop error: {}", e);
            }
        });

        Ok(Self {
            server,
            mainloop_handle,
            child,
            ready_rx: Some(ready_rx),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LspServerConfig {
        &self.config
    }

    /// Initialize the server with the configured root as the only workspace
    /// folder
    ///
    /// # Errors
    /// Returns an error if initialization fails.
    pub async fn initialize(&mut self) -> Result<()> {
        let root_url = file_url(&self.config.root_path)?;

        tracing::debug!(
            "Initializing LSP with init_options: {:?}",
            self.config.init_options
        );

        #[allow(deprecated)]
        let params = InitializeParams {
            process_id: Some(std::process::id()),
            root_uri: Some(root_url.clone()),
            workspace_folders: Some(vec![WorkspaceFolder {
                uri: root_url,
                name: "root".into(),
            }]),
            capabilities: ClientCapabilities {
                window: Some(WindowClientCapabilities {
                    work_done_progress: Some(true),
                    ..Default::default()
                }),
                text_document: Some(TextDocumentClientCapabilities {
                    hover: Some(HoverClientCapabilities {
                        content_format: Some(vec![MarkupKind::Markdown, MarkupKind::PlainText]),
                        ..Default::default()
                    }),
                    selection_range: Some(SelectionRangeClientCapabilities::default()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            initialization_options: self.config.init_options.clone(),
            ..Default::default()
        };

        let _result = self.server.initialize(params).await?;
        self.server.initialized(InitializedParams {})?;

        Ok(())
    }

    /// Wait, at most once and for the configured time, for the server to
    /// report it has loaded the project
    pub async fn wait_for_ready(&mut self) {
        if let Some(rx) = self.ready_rx.take() {
            match tokio::time::timeout(self.config.ready_timeout, rx).await {
                Ok(Ok(())) => {
                    tracing::info!("Language server ready");
                }
                Ok(Err(_)) => {
                    tracing::debug!("Ready channel closed");
                }
                Err(_) => {
                    tracing::debug!("Ready wait timed out, proceeding anyway");
                }
            }
        }
    }

    /// Notify the server that a file was opened
    ///
    /// # Errors
    /// Returns an error if the notification fails.
    pub fn did_open(
        &mut self,
        uri: &Url,
        language_id: &str,
        version: i32,
        text: &str,
    ) -> Result<()> {
        self.server.did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: language_id.into(),
                version,
                text: text.into(),
            },
        })?;
        Ok(())
    }

    /// Replace the full text of an open file
    ///
    /// # Errors
    /// Returns an error if the notification fails.
    pub fn did_change(&mut self, uri: &Url, version: i32, text: &str) -> Result<()> {
        self.server.did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: text.into(),
            }],
        })?;
        Ok(())
    }

    /// Enclosing selection ranges at `position`, innermost first
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn selection_range(
        &mut self,
        uri: &Url,
        position: Position,
    ) -> Result<Option<SelectionRange>> {
        let params = SelectionRangeParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            positions: vec![to_lsp(position)],
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
        };

        let response = self.server.selection_range(params).await?;
        Ok(response.and_then(|ranges| ranges.into_iter().next()))
    }

    /// Get hover information for a symbol at a position
    ///
    /// Returns the hover content as a string, or None if no hover info is available.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn hover(&mut self, uri: &Url, position: Position) -> Result<Option<String>> {
        let params = HoverParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: to_lsp(position),
            },
            work_done_progress_params: Default::default(),
        };

        let response = self.server.hover(params).await?;

        let content = response.and_then(|hover| match hover.contents {
            HoverContents::Scalar(marked) => Some(marked_string_to_string(marked)),
            HoverContents::Array(items) => {
                let text: Vec<String> = items.into_iter().map(marked_string_to_string).collect();
                if text.is_empty() {
                    None
                } else {
                    Some(text.join("\n\n"))
                }
            }
            HoverContents::Markup(markup) => Some(markup.value),
        });

        Ok(content)
    }

    /// Shutdown the LSP server
    ///
    /// # Errors
    /// Returns an error if shutdown fails.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.server.shutdown(()).await?;
        self.server.exit(())?;
        self.server.emit(Stop)?;
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut self.mainloop_handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("LSP mainloop task ended abnormally: {}", e),
            Err(_) => tracing::debug!("LSP mainloop still running after shutdown"),
        }
        Ok(())
    }
}

/// `file://` URL for an absolute path
///
/// # Errors
/// Returns an error if `path` is relative.
pub(super) fn file_url(path: &std::path::Path) -> Result<Url> {
    Url::from_file_path(path)
        .map_err(|()| anyhow!("{} is not an absolute path", path.display()))
}

/// Convert a MarkedString to a plain String, keeping the language fence
fn marked_string_to_string(marked: MarkedString) -> String {
    match marked {
        MarkedString::String(s) => s,
        MarkedString::LanguageString(ls) => format!("```{}\n{}\n```", ls.language, ls.value),
    }
}

fn to_lsp(position: Position) -> LspPosition {
    LspPosition::new(position.line, position.character)
}
