//! File walker: Bounded discovery of project source files

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::SourceKind;

/// Default limit on directory levels below the root
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default limit on collected files
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Directories that never hold project sources
pub const SKIPPED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    ".git",
    ".hg",
    ".svn",
    "dist",
    "build",
    "out",
    "coverage",
    ".vscode",
    ".idea",
    "tmp",
    "temp",
    ".cache",
    ".next",
    ".nuxt",
];

/// Whether the walker refuses to enter a directory with this name
#[must_use]
pub fn is_skipped_directory(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name)
}

/// Bounds for source discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Directory levels below the root that are still entered
    pub max_depth: usize,
    /// Files collected before the walk stops
    pub max_files: usize,
    pub follow_links: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            follow_links: true,
        }
    }
}

impl WalkConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }
}

/// A source file discovered during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Ordered set of files forming the analyzed project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFileSet {
    pub files: Vec<SourceFile>,
    /// Set when the walk stopped at `max_files`
    pub truncated: bool,
}

impl SourceFileSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.iter().map(|f| f.path.as_path())
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

/// Walk `root` depth-first and collect source files within `config` bounds.
///
/// Unreadable directories and symlink loops are skipped; a project larger
/// than the bounds is returned partially with `truncated` set.
#[must_use]
pub fn enumerate_source_files(root: &Path, config: &WalkConfig) -> SourceFileSet {
    let mut set = SourceFileSet::default();
    if config.max_files == 0 {
        return set;
    }

    // Files inside a directory sit one entry level below it.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(config.follow_links)
        .max_depth(Some(config.max_depth + 1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.file_name().to_str().is_some_and(is_skipped_directory))
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(kind) = SourceKind::from_path(entry.path()) else {
            continue;
        };
        if set.files.len() == config.max_files {
            set.truncated = true;
            break;
        }
        set.files.push(SourceFile {
            path: entry.into_path(),
            kind,
        });
    }

    if set.truncated {
        tracing::info!(
            "Source discovery under {} stopped at {} files",
            root.display(),
            config.max_files
        );
    } else {
        tracing::debug!("Discovered {} source files under {}", set.len(), root.display());
    }
    set
}
