//! Copy-type command dispatcher

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Clipboard, CopyTypeError, EditorSnapshot, Notifier, Target};
use crate::engine::EngineBackend;
use crate::project::{ProjectError, ProjectResolver, ProjectRoot, WalkConfig};
use crate::resolve::{DEFAULT_TOLERANCE, HoverCache, RenderPreset};
use crate::session::AnalysisSession;

/// Settings for a [`TypeCopier`]
#[derive(Debug, Clone, Default)]
pub struct CopierConfig {
    /// Workspace folder; files outside it have no project context
    pub workspace: Option<PathBuf>,
    pub preset: RenderPreset,
    /// Same-line character distance for reusing the last result
    pub tolerance: Option<u32>,
    pub walk: WalkConfig,
}

impl CopierConfig {
    #[must_use]
    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    #[must_use]
    pub fn with_preset(mut self, preset: RenderPreset) -> Self {
        self.preset = preset;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    #[must_use]
    pub fn with_walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }
}

/// Commands exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    CopyTypeAtCursor,
    /// Older name for the same command
    CopyVariableType,
}

impl CommandKind {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CopyTypeAtCursor => "copyTypeAtCursor",
            Self::CopyVariableType => "copyVariableType",
        }
    }
}

/// Result of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text written to the clipboard
    Copied(String),
    Warning(String),
    Error(String),
}

/// Owns the project resolver, the analysis session and the last-hover cache,
/// and runs the copy commands against them
pub struct TypeCopier<B: EngineBackend> {
    config: CopierConfig,
    projects: ProjectResolver,
    session: AnalysisSession<B>,
    cache: Mutex<HoverCache>,
}

impl<B: EngineBackend> TypeCopier<B> {
    #[must_use]
    pub fn new(backend: B, config: CopierConfig) -> Self {
        let projects = ProjectResolver::new(config.workspace.clone());
        let session = AnalysisSession::new(backend, config.walk);
        let cache = HoverCache::new(config.tolerance.unwrap_or(DEFAULT_TOLERANCE));
        Self {
            config,
            projects,
            session,
            cache: Mutex::new(cache),
        }
    }

    #[must_use]
    pub fn session(&self) -> &AnalysisSession<B> {
        &self.session
    }

    #[must_use]
    pub fn projects(&self) -> &ProjectResolver {
        &self.projects
    }

    /// Resolve the type at the cursor or selection and copy it
    pub async fn copy_type_at_cursor(
        &self,
        editor: Option<&EditorSnapshot>,
        clipboard: &dyn Clipboard,
        notifier: &dyn Notifier,
    ) -> CommandOutcome {
        self.run(CommandKind::CopyTypeAtCursor, editor, clipboard, notifier)
            .await
    }

    /// Same as [`Self::copy_type_at_cursor`]
    pub async fn copy_variable_type(
        &self,
        editor: Option<&EditorSnapshot>,
        clipboard: &dyn Clipboard,
        notifier: &dyn Notifier,
    ) -> CommandOutcome {
        self.run(CommandKind::CopyVariableType, editor, clipboard, notifier)
            .await
    }

    /// Run `kind`, reporting the result through `clipboard` and `notifier`
    pub async fn run(
        &self,
        kind: CommandKind,
        editor: Option<&EditorSnapshot>,
        clipboard: &dyn Clipboard,
        notifier: &dyn Notifier,
    ) -> CommandOutcome {
        tracing::debug!("Running command {}", kind.id());

        match self.resolve(editor).await {
            Ok(text) => {
                clipboard.write(&text).await;
                notifier.info(&format!("Copied type: {text}"));
                CommandOutcome::Copied(text)
            }
            Err(err @ (CopyTypeError::NoSelection | CopyTypeError::TypeUnavailable { .. })) => {
                let message = err.to_string();
                notifier.warn(&message);
                CommandOutcome::Warning(message)
            }
            Err(err @ CopyTypeError::NoActiveContext(_)) => {
                let message = err.to_string();
                notifier.error(&message);
                CommandOutcome::Error(message)
            }
            Err(CopyTypeError::EngineFailure(e)) => {
                tracing::error!("{} failed: {:#}", kind.id(), e);
                let message = "Failed to resolve type, see log for details".to_string();
                notifier.error(&message);
                CommandOutcome::Error(message)
            }
        }
    }

    /// Resolve the type string for the editor's cursor or selection
    ///
    /// # Errors
    /// Returns the [`CopyTypeError`] describing why no type was produced.
    pub async fn resolve(&self, editor: Option<&EditorSnapshot>) -> Result<String, CopyTypeError> {
        let editor = editor
            .ok_or_else(|| CopyTypeError::NoActiveContext("no active editor".to_string()))?;
        let path = editor.path.as_deref().ok_or_else(|| {
            CopyTypeError::NoActiveContext("the document has not been saved".to_string())
        })?;
        let target = Target::from_editor(editor)?;

        if let Some(cached) = self.cache.lock().lookup(path, target.position) {
            tracing::debug!("Reusing cached type for {}", path.display());
            return Ok(cached.text.clone());
        }

        let project = self.resolve_project(path)?;
        let mut rendered = self
            .session
            .resolve_type(
                &project,
                path,
                &editor.text,
                target.offset,
                self.config.preset.flags(),
            )
            .await?
            .filter(|rendered| rendered.is_informative())
            .ok_or_else(|| CopyTypeError::TypeUnavailable {
                symbol: target.symbol.clone(),
            })?;

        rendered.text = rendered.text.trim().to_string();
        let text = rendered.text.clone();
        self.cache.lock().store(path, target.position, rendered);
        Ok(text)
    }

    /// Release the engine
    ///
    /// # Errors
    /// Returns an error if the engine fails to shut down.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.cache.lock().clear();
        self.session.shutdown().await
    }

    fn resolve_project(&self, path: &Path) -> Result<Arc<ProjectRoot>, CopyTypeError> {
        let backend = self.session.backend();
        self.projects
            .resolve_with(path, |manifest| backend.parse_config(manifest))
            .map_err(|err| match err {
                ProjectError::NoContext(_) => CopyTypeError::NoActiveContext(err.to_string()),
                ProjectError::Manifest { .. } => CopyTypeError::EngineFailure(err.into()),
            })
    }
}
