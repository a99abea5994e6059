//! Engine traits

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::host::EngineHost;
use super::types::{CompilerOptions, NodeId, TextRange};
use crate::project::{ProjectRoot, SourceFileSet, parse_manifest};
use crate::resolve::RenderFlags;
use crate::session::FileRecord;

/// Read-only view of a parsed file
pub trait SyntaxTree: Send + Sync {
    /// The node spanning the whole file
    fn root(&self) -> NodeId;

    /// Byte range covered by `node`
    fn range(&self, node: NodeId) -> TextRange;

    /// Enclosing node, `None` for the root
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Visit the direct children of `node` in source order
    fn for_each_child(&self, node: NodeId, f: &mut dyn FnMut(NodeId));
}

/// A live static-analysis engine bound to one project root
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    type Tree: SyntaxTree;
    type Type: Send + Sync;

    /// Parse (or re-parse) `file`.
    ///
    /// `focus` is the offset the caller is about to query. Engines that only
    /// materialize part of the tree around a position use it; engines that
    /// build full trees ignore it.
    ///
    /// # Errors
    /// Returns an error if the engine cannot parse the file.
    async fn syntax_tree(&self, file: &FileRecord, focus: usize) -> Result<Self::Tree>;

    /// The inferred type of `node`, if the engine has one
    ///
    /// # Errors
    /// Returns an error if the engine query fails.
    async fn type_at_node(&self, tree: &Self::Tree, node: NodeId) -> Result<Option<Self::Type>>;

    /// Render a type handle to source text
    fn render_type(
        &self,
        ty: &Self::Type,
        tree: &Self::Tree,
        node: NodeId,
        flags: RenderFlags,
    ) -> String;

    /// Release engine resources (processes, caches)
    ///
    /// # Errors
    /// Returns an error if the engine fails to shut down cleanly.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Factory for engines, one per project root
#[async_trait]
pub trait EngineBackend: Send + Sync {
    type Engine: AnalysisEngine;

    /// Expand a project manifest into a full option set
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be read or parsed.
    fn parse_config(&self, manifest: &Path) -> Result<CompilerOptions> {
        parse_manifest(manifest)
    }

    /// Construct an engine for `project` over `files`, answering its file
    /// queries through `host`
    ///
    /// # Errors
    /// Returns an error if the engine cannot be started.
    async fn create_engine(
        &self,
        project: &ProjectRoot,
        files: &SourceFileSet,
        host: Arc<dyn EngineHost>,
    ) -> Result<Self::Engine>;
}
