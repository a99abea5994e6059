//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use typegrab_core::RenderPreset;
use typegrab_core::project::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES, WalkConfig};
use typegrab_core::resolve::DEFAULT_TOLERANCE;

#[derive(Debug, Parser)]
#[command(name = "typegrab")]
#[command(author, version, about = "Copy the inferred type at a cursor position", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the type at a position and copy it
    CopyType(CopyArgs),

    /// Same as copy-type
    CopyVariableType(CopyArgs),

    /// Answer copy requests read from stdin, one JSON object per line,
    /// keeping the language server and the last result between requests
    Serve(ServeArgs),

    /// List the source files a project would load
    Files(FilesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CopyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Where to look: a file and a cursor or selection in it.
///
/// Also the body of a `serve` request.
#[derive(Debug, Clone, Args, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetArgs {
    /// Source file to query
    pub file: PathBuf,

    /// Zero-based cursor line
    #[arg(long)]
    pub line: u32,

    /// Zero-based cursor column, in UTF-16 code units
    #[arg(long)]
    pub character: u32,

    /// Selection end line; the cursor is the selection start
    #[arg(long, requires = "end_character")]
    pub end_line: Option<u32>,

    /// Selection end column
    #[arg(long, requires = "end_line")]
    pub end_character: Option<u32>,
}

/// Settings shared by every request against one copier
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Workspace folder; files outside it are rejected
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Rendering preset
    #[arg(long, default_value = "portable")]
    pub render: RenderPreset,

    /// Same-line distance within which the previous result is reused
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u32,

    #[command(flatten)]
    pub walk: WalkArgs,

    /// Language server command line
    #[arg(long)]
    pub server: Option<String>,

    /// Command that receives the type on stdin (prints to stdout otherwise)
    #[arg(long)]
    pub clipboard_cmd: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Debug, Clone, Args)]
pub struct FilesArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub walk: WalkArgs,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct WalkArgs {
    /// Maximum number of source files to load
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Maximum directory depth below the project root
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl From<WalkArgs> for WalkConfig {
    fn from(args: WalkArgs) -> Self {
        WalkConfig::default()
            .with_max_files(args.max_files)
            .with_max_depth(args.max_depth)
    }
}
