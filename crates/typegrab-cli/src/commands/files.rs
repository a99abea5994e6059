//! `files`: list the source files a project would load

use std::path::Path;

use anyhow::{Context, Result};
use typegrab_core::project::{ProjectResolver, SourceFileSet, WalkConfig, enumerate_source_files};

/// Enumerate the sources under the project root that owns `dir`
///
/// # Errors
/// Returns an error if `dir` does not exist.
pub fn collect(dir: &Path, walk: &WalkConfig) -> Result<SourceFileSet> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))?;
    // Resolve as if a file in `dir` were open, so a manifest above it wins
    let project = ProjectResolver::new(None).resolve(&dir.join("_"))?;
    tracing::debug!("Listing sources under {}", project.root.display());
    Ok(enumerate_source_files(&project.root, walk))
}

/// Print the enumerated sources, one per line
///
/// # Errors
/// Returns an error if `dir` does not exist.
pub fn run(dir: &Path, walk: &WalkConfig) -> Result<()> {
    let files = collect(dir, walk)?;
    for file in &files.files {
        println!("{}\t{}", file.kind, file.path.display());
    }
    if files.truncated {
        eprintln!("warning: stopped after {} files", files.len());
    }
    tracing::info!("{} source files", files.len());
    Ok(())
}
