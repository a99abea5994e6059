//! Project root resolution with a per-root cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::manifest::{default_options, find_manifest, parse_manifest};
use crate::engine::CompilerOptions;

/// A project directory and its resolved compiler options
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRoot {
    pub root: PathBuf,
    /// Manifest the options came from; `None` when defaults are in use
    pub manifest: Option<PathBuf>,
    pub options: CompilerOptions,
}

impl ProjectRoot {
    /// A root using the built-in default options
    #[must_use]
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest: None,
            options: default_options(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    /// The file cannot be tied to any workspace
    #[error("{} is not inside an open workspace", .0.display())]
    NoContext(PathBuf),

    #[error("failed to load project manifest {}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Resolves files to project roots, caching each root for the process lifetime
#[derive(Debug, Default)]
pub struct ProjectResolver {
    workspace: Option<PathBuf>,
    cache: Mutex<HashMap<PathBuf, Arc<ProjectRoot>>>,
}

impl ProjectResolver {
    /// Create a resolver. With a workspace folder, files outside it have no
    /// project context and manifest-less files fall back to it as their root.
    #[must_use]
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self {
            workspace: workspace.map(|ws| canonical(&ws)),
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    /// Resolve the project for `file` using the built-in manifest parser
    ///
    /// # Errors
    /// Returns an error if the file has no project context or its manifest
    /// cannot be parsed.
    pub fn resolve(&self, file: &Path) -> Result<Arc<ProjectRoot>, ProjectError> {
        self.resolve_with(file, parse_manifest)
    }

    /// Resolve the project for `file`, expanding a found manifest with `parse`
    ///
    /// # Errors
    /// Returns an error if the file has no project context or `parse` fails.
    pub fn resolve_with<F>(&self, file: &Path, parse: F) -> Result<Arc<ProjectRoot>, ProjectError>
    where
        F: FnOnce(&Path) -> anyhow::Result<CompilerOptions>,
    {
        let file = canonical(file);
        if let Some(ws) = &self.workspace {
            if !file.starts_with(ws) {
                return Err(ProjectError::NoContext(file));
            }
        }
        let dir = file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| ProjectError::NoContext(file.clone()))?;

        let manifest = find_manifest(dir);
        let root = match &manifest {
            Some(path) => path.parent().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            None => self.workspace.clone().unwrap_or_else(|| dir.to_path_buf()),
        };

        if let Some(cached) = self.cache.lock().get(&root) {
            return Ok(Arc::clone(cached));
        }

        let project = match manifest {
            Some(path) => {
                let options = parse(&path).map_err(|source| ProjectError::Manifest {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!("Using project manifest {}", path.display());
                ProjectRoot {
                    root: root.clone(),
                    manifest: Some(path),
                    options,
                }
            }
            None => {
                tracing::info!(
                    "No manifest found for {}, using default options at {}",
                    file.display(),
                    root.display()
                );
                ProjectRoot::with_defaults(root.clone())
            }
        };

        let project = Arc::new(project);
        self.cache.lock().insert(root, Arc::clone(&project));
        Ok(project)
    }

    /// Drop the cached project for `root`, forcing re-resolution
    pub fn invalidate(&self, root: &Path) -> bool {
        self.cache.lock().remove(root).is_some()
    }

    #[must_use]
    pub fn cached_roots(&self) -> usize {
        self.cache.lock().len()
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
