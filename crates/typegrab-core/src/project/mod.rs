//! Project module: Root, configuration and source discovery
//!
//! Locates the project a file belongs to, expands its compiler options, and
//! walks the project tree to find the source files the engine should load.

mod language;
mod manifest;
mod resolver;
mod walker;

pub use language::SourceKind;
pub use manifest::{
    DEFAULT_MANIFEST_NAMES, default_options, find_manifest, parse_manifest, strip_json_comments,
};
pub use resolver::{ProjectError, ProjectResolver, ProjectRoot};
pub use walker::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES, SKIPPED_DIRECTORIES, SourceFile, SourceFileSet,
    WalkConfig, enumerate_source_files, is_skipped_directory,
};

#[cfg(test)]
mod tests;
