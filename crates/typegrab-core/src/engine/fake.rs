//! In-memory engine for unit tests

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::{AnalysisEngine, EngineBackend, EngineHost, NodeId, SyntaxTree, TextRange};
use crate::project::{ProjectRoot, SourceFileSet};
use crate::resolve::RenderFlags;
use crate::session::FileRecord;

/// Rendered types longer than this are cut when truncation is allowed
const TRUNCATE_AT: usize = 24;

#[derive(Debug, Clone)]
struct FakeNode {
    range: TextRange,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    ty: Option<String>,
}

/// Hand-built syntax tree with an optional type per node
#[derive(Debug, Clone)]
pub(crate) struct FakeTree {
    nodes: Vec<FakeNode>,
}

impl FakeTree {
    /// A tree whose untyped root spans `len` bytes
    pub(crate) fn new(len: usize) -> Self {
        Self {
            nodes: vec![FakeNode {
                range: TextRange::new(0, len),
                parent: None,
                children: Vec::new(),
                ty: None,
            }],
        }
    }

    pub(crate) fn add(
        &mut self,
        parent: NodeId,
        start: usize,
        end: usize,
        ty: Option<&str>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(FakeNode {
            range: TextRange::new(start, end),
            parent: Some(parent),
            children: Vec::new(),
            ty: ty.map(str::to_string),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub(crate) fn set_type(&mut self, node: NodeId, ty: &str) {
        self.nodes[node.index()].ty = Some(ty.to_string());
    }
}

impl SyntaxTree for FakeTree {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn range(&self, node: NodeId) -> TextRange {
        self.nodes[node.index()].range
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    fn for_each_child(&self, node: NodeId, f: &mut dyn FnMut(NodeId)) {
        for child in &self.nodes[node.index()].children {
            f(*child);
        }
    }
}

/// Counters shared between a backend and every engine it creates
#[derive(Debug, Default)]
pub(crate) struct FakeStats {
    pub(crate) engines_created: AtomicUsize,
    pub(crate) parses: AtomicUsize,
    pub(crate) type_queries: AtomicUsize,
    pub(crate) shutdowns: AtomicUsize,
    pub(crate) last_version: Mutex<Option<u64>>,
    pub(crate) host_files: Mutex<Vec<PathBuf>>,
}

impl FakeStats {
    pub(crate) fn engines_created(&self) -> usize {
        self.engines_created.load(Ordering::SeqCst)
    }

    pub(crate) fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    pub(crate) fn type_queries(&self) -> usize {
        self.type_queries.load(Ordering::SeqCst)
    }

    pub(crate) fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

type TreeBuilder = Arc<dyn Fn(&str) -> FakeTree + Send + Sync>;

#[derive(Clone)]
pub(crate) struct FakeBackend {
    builder: TreeBuilder,
    pub(crate) stats: Arc<FakeStats>,
    create_delay: Option<Duration>,
    fail_create: bool,
}

impl FakeBackend {
    pub(crate) fn new(builder: impl Fn(&str) -> FakeTree + Send + Sync + 'static) -> Self {
        Self {
            builder: Arc::new(builder),
            stats: Arc::new(FakeStats::default()),
            create_delay: None,
            fail_create: false,
        }
    }

    /// Sleep during engine construction so concurrent callers overlap
    pub(crate) fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_create = true;
        self
    }
}

#[async_trait]
impl EngineBackend for FakeBackend {
    type Engine = FakeEngine;

    async fn create_engine(
        &self,
        _project: &ProjectRoot,
        _files: &SourceFileSet,
        host: Arc<dyn EngineHost>,
    ) -> Result<FakeEngine> {
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_create {
            anyhow::bail!("fake engine refused to start");
        }
        self.stats.engines_created.fetch_add(1, Ordering::SeqCst);
        *self.stats.host_files.lock() = host.file_names();
        Ok(FakeEngine {
            builder: Arc::clone(&self.builder),
            stats: Arc::clone(&self.stats),
        })
    }
}

pub(crate) struct FakeEngine {
    builder: TreeBuilder,
    stats: Arc<FakeStats>,
}

#[async_trait]
impl AnalysisEngine for FakeEngine {
    type Tree = FakeTree;
    type Type = String;

    async fn syntax_tree(&self, file: &FileRecord, _focus: usize) -> Result<FakeTree> {
        self.stats.parses.fetch_add(1, Ordering::SeqCst);
        *self.stats.last_version.lock() = Some(file.version);
        Ok((self.builder)(&file.text))
    }

    async fn type_at_node(&self, tree: &FakeTree, node: NodeId) -> Result<Option<String>> {
        self.stats.type_queries.fetch_add(1, Ordering::SeqCst);
        Ok(tree.nodes[node.index()].ty.clone())
    }

    fn render_type(
        &self,
        ty: &String,
        _tree: &FakeTree,
        _node: NodeId,
        flags: RenderFlags,
    ) -> String {
        if flags.no_truncation || ty.len() <= TRUNCATE_AT {
            ty.clone()
        } else {
            format!("{}...", &ty[..TRUNCATE_AT])
        }
    }

    async fn shutdown(&self) -> Result<()> {
        self.stats.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
