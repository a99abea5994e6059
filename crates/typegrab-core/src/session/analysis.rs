//! Analysis session lifecycle

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use super::{FileRecord, FileTable, SessionHost};
use crate::engine::{AnalysisEngine, EngineBackend};
use crate::project::{ProjectRoot, SourceFileSet, WalkConfig, enumerate_source_files};
use crate::resolve::{self, RenderFlags, RenderedType};

/// Engine and file state for the active project root
struct ActiveSession<E> {
    project: Arc<ProjectRoot>,
    files: SourceFileSet,
    table: Arc<RwLock<FileTable>>,
    engine: E,
}

/// Single active analysis session.
///
/// All state sits behind one async mutex, which doubles as the in-flight
/// guard: a query arriving while the engine is being (re)built waits for that
/// build and then reuses it.
pub struct AnalysisSession<B: EngineBackend> {
    backend: B,
    walk: WalkConfig,
    state: Mutex<Option<ActiveSession<B::Engine>>>,
}

impl<B: EngineBackend> AnalysisSession<B> {
    #[must_use]
    pub fn new(backend: B, walk: WalkConfig) -> Self {
        Self {
            backend,
            walk,
            state: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Make sure an engine for `project` is running, rebuilding from scratch
    /// if another root is active
    ///
    /// # Errors
    /// Returns an error if the engine cannot be constructed.
    pub async fn ensure_ready(&self, project: &Arc<ProjectRoot>) -> Result<()> {
        let mut state = self.state.lock().await;
        self.activate(&mut state, project).await?;
        Ok(())
    }

    /// Record the current text of `path` in the active session
    ///
    /// # Errors
    /// Returns an error if no session is active.
    pub async fn get_or_update_file(&self, path: &Path, text: &str) -> Result<FileRecord> {
        let state = self.state.lock().await;
        let active = state
            .as_ref()
            .ok_or_else(|| anyhow!("Analysis session is not initialized"))?;
        let record = active.table.write().get_or_update(path, text);
        Ok(record)
    }

    /// Render the type of the node at `offset` in the active session, without
    /// the parent fallback
    ///
    /// # Errors
    /// Returns an error if no session is active or the engine query fails.
    pub async fn type_of_node(
        &self,
        path: &Path,
        text: &str,
        offset: usize,
        flags: RenderFlags,
    ) -> Result<Option<String>> {
        let state = self.state.lock().await;
        let active = state
            .as_ref()
            .ok_or_else(|| anyhow!("Analysis session is not initialized"))?;
        let record = active.table.write().get_or_update(path, text);
        let tree = active.engine.syntax_tree(&record, offset).await?;
        match resolve::find_node_at(&tree, offset) {
            Some(node) => resolve::render_node(&active.engine, &tree, node, flags).await,
            None => Ok(None),
        }
    }

    /// Resolve and render the type at `offset` in `path` for `project`.
    ///
    /// Activates the project if needed and brings the file's text up to date
    /// before querying, all under the session lock.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be built or a query fails.
    pub async fn resolve_type(
        &self,
        project: &Arc<ProjectRoot>,
        path: &Path,
        text: &str,
        offset: usize,
        flags: RenderFlags,
    ) -> Result<Option<RenderedType>> {
        let mut state = self.state.lock().await;
        let active = self.activate(&mut state, project).await?;

        let record = active.table.write().get_or_update(path, text);
        let tree = active.engine.syntax_tree(&record, offset).await?;
        resolve::resolve_type(&active.engine, &tree, offset, flags).await
    }

    /// Root of the active project, if any
    pub async fn active_root(&self) -> Option<PathBuf> {
        let state = self.state.lock().await;
        state.as_ref().map(|active| active.project.root.clone())
    }

    /// Source files of the active project
    pub async fn source_files(&self) -> Option<SourceFileSet> {
        let state = self.state.lock().await;
        state.as_ref().map(|active| active.files.clone())
    }

    /// Current version of `path` in the active session
    pub async fn file_version(&self, path: &Path) -> Option<u64> {
        let state = self.state.lock().await;
        state.as_ref().map(|active| active.table.read().version(path))
    }

    /// Shut the engine down and drop every cached file record.
    ///
    /// Shutdown failures are logged, not returned.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if let Some(active) = state.take() {
            tracing::debug!("Discarding session for {}", active.project.root.display());
            if let Err(e) = active.engine.shutdown().await {
                tracing::warn!("Failed to shut down engine on reset: {}", e);
            }
        }
    }

    /// Drop the session and let the engine release its resources
    ///
    /// # Errors
    /// Returns an error if the engine fails to shut down.
    pub async fn shutdown(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        match state.take() {
            Some(active) => active.engine.shutdown().await,
            None => Ok(()),
        }
    }

    async fn activate<'a>(
        &self,
        state: &'a mut Option<ActiveSession<B::Engine>>,
        project: &Arc<ProjectRoot>,
    ) -> Result<&'a ActiveSession<B::Engine>> {
        let needs_init = match state.as_ref() {
            Some(active) => active.project.root != project.root,
            None => true,
        };

        if needs_init {
            if let Some(previous) = state.take() {
                tracing::info!(
                    "Project root changed from {} to {}, rebuilding session",
                    previous.project.root.display(),
                    project.root.display()
                );
                if let Err(e) = previous.engine.shutdown().await {
                    tracing::warn!("Failed to shut down previous engine: {}", e);
                }
            }
            *state = Some(self.initialize(project).await?);
        }

        state
            .as_ref()
            .ok_or_else(|| anyhow!("Analysis session is not initialized"))
    }

    async fn initialize(&self, project: &Arc<ProjectRoot>) -> Result<ActiveSession<B::Engine>> {
        let root = project.root.clone();
        let walk = self.walk;
        let files =
            tokio::task::spawn_blocking(move || enumerate_source_files(&root, &walk)).await?;
        tracing::info!(
            "Initializing analysis session for {} ({} files{})",
            project.root.display(),
            files.len(),
            if files.truncated { ", truncated" } else { "" }
        );

        let table = Arc::new(RwLock::new(FileTable::new(
            files.paths().map(Path::to_path_buf).collect(),
        )));
        let host = Arc::new(SessionHost::new(Arc::clone(&table), project.root.clone()));
        let engine = self.backend.create_engine(project, &files, host).await?;

        Ok(ActiveSession {
            project: Arc::clone(project),
            files,
            table,
            engine,
        })
    }
}
