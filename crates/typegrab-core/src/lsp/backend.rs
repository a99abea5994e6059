//! Engine backend over a TypeScript language server

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_lsp::lsp_types::Url;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::client::{LspClient, file_url};
use super::config::LspServerConfig;
use super::hover::{render_hover_type, type_from_hover};
use super::tree::ChainTree;
use crate::engine::{AnalysisEngine, EngineBackend, EngineHost, NodeId, SyntaxTree};
use crate::line_index::LineIndex;
use crate::project::{ProjectRoot, SourceFileSet, SourceKind};
use crate::resolve::RenderFlags;
use crate::session::FileRecord;

/// Starts one language server per project root
#[derive(Debug, Clone, Default)]
pub struct LspBackend {
    config: LspServerConfig,
}

impl LspBackend {
    /// `config.root_path` is replaced by each project's root
    #[must_use]
    pub fn new(config: LspServerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LspServerConfig {
        &self.config
    }
}

#[async_trait]
impl EngineBackend for LspBackend {
    type Engine = LspEngine;

    async fn create_engine(
        &self,
        project: &ProjectRoot,
        files: &SourceFileSet,
        host: Arc<dyn EngineHost>,
    ) -> Result<LspEngine> {
        let mut config = self.config.clone().with_root(&project.root);
        if let Some(lib) = host.default_lib_location(&project.options) {
            tracing::debug!("Using TypeScript library at {}", lib.display());
            config = config.with_typescript_lib(&lib);
        }

        tracing::info!(
            "Starting {} for {} ({} source files)",
            config.command,
            project.root.display(),
            files.len()
        );
        let mut client = LspClient::start(config).await?;
        client.initialize().await?;

        Ok(LspEngine {
            state: Mutex::new(EngineState {
                client,
                opened: HashMap::new(),
            }),
            host,
        })
    }
}

struct EngineState {
    client: LspClient,
    /// Version last sent to the server for each open document
    opened: HashMap<PathBuf, i32>,
}

impl EngineState {
    /// Bring the server's copy of `file` up to `version`
    async fn sync(&mut self, uri: &Url, file: &FileRecord, version: i32) -> Result<()> {
        match self.opened.get(&file.path) {
            None => {
                let language_id = SourceKind::from_path(&file.path)
                    .map_or("typescript", |kind| kind.language_id());
                self.client.did_open(uri, language_id, version, &file.text)?;
                let first = self.opened.is_empty();
                self.opened.insert(file.path.clone(), version);
                if first {
                    self.client.wait_for_ready().await;
                }
            }
            Some(&sent) if sent != version => {
                tracing::debug!("Sending {} version {}", file.path.display(), version);
                self.client.did_change(uri, version, &file.text)?;
                self.opened.insert(file.path.clone(), version);
            }
            Some(_) => {}
        }
        Ok(())
    }
}

/// A running language server answering type queries
pub struct LspEngine {
    state: Mutex<EngineState>,
    host: Arc<dyn EngineHost>,
}

impl LspEngine {
    /// Version to report for `file`, as the host sees it
    fn version_of(&self, file: &FileRecord) -> i32 {
        let version = match self.host.version(&file.path) {
            0 => file.version,
            known => known,
        };
        i32::try_from(version).unwrap_or(i32::MAX)
    }
}

#[async_trait]
impl AnalysisEngine for LspEngine {
    type Tree = ChainTree;
    type Type = String;

    async fn syntax_tree(&self, file: &FileRecord, focus: usize) -> Result<ChainTree> {
        let uri = file_url(&file.path)?;
        let index = LineIndex::new(Arc::clone(&file.text));
        let version = self.version_of(file);

        let mut state = self.state.lock().await;
        state.sync(&uri, file, version).await?;
        let selection = state
            .client
            .selection_range(&uri, index.position(focus))
            .await?;

        Ok(ChainTree::from_selection(uri, &index, selection.as_ref()))
    }

    async fn type_at_node(&self, tree: &ChainTree, node: NodeId) -> Result<Option<String>> {
        if node == tree.root() {
            return Ok(None);
        }
        let mut state = self.state.lock().await;
        let hover = state.client.hover(tree.uri(), tree.start(node)).await?;
        Ok(hover.as_deref().and_then(type_from_hover))
    }

    /// Hover text is already rendered by the server; only qualifier stripping
    /// and truncation checks are applied here
    fn render_type(
        &self,
        ty: &String,
        _tree: &ChainTree,
        _node: NodeId,
        flags: RenderFlags,
    ) -> String {
        render_hover_type(ty, flags)
    }

    async fn shutdown(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        tracing::debug!("Shutting down {}", state.client.config().command);
        state.client.shutdown().await
    }
}
