//! Language server configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long to wait for the server to report it has loaded the project
/// after the first document is opened
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Hover length passed to tsserver so long types come back whole
pub const MAX_HOVER_LENGTH: u32 = 1_000_000;

/// Configuration for a TypeScript language server
#[derive(Debug, Clone)]
pub struct LspServerConfig {
    /// Command to start the server
    pub command: String,
    /// Arguments to the command
    pub args: Vec<String>,
    /// Working directory and workspace root
    pub root_path: PathBuf,
    /// Initialization options (JSON)
    pub init_options: Option<serde_json::Value>,
    pub ready_timeout: Duration,
}

impl Default for LspServerConfig {
    fn default() -> Self {
        Self {
            command: "typescript-language-server".to_string(),
            args: vec!["--stdio".to_string()],
            root_path: PathBuf::from("."),
            init_options: Some(serde_json::json!({
                "preferences": { "maximumHoverLength": MAX_HOVER_LENGTH }
            })),
            ready_timeout: DEFAULT_READY_TIMEOUT,
        }
    }
}

impl LspServerConfig {
    /// Parse a shell-like command line (`program arg...`) into a config.
    ///
    /// Returns `None` for a blank command line.
    #[must_use]
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let command = parts.next()?;
        Some(Self {
            command,
            args: parts.collect(),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = root.into();
        self
    }

    #[must_use]
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Point the server at a project-local TypeScript `lib` directory.
    ///
    /// An explicit `tsserver.path` already present in the options is kept.
    #[must_use]
    pub fn with_typescript_lib(mut self, lib: &Path) -> Self {
        let mut options = self
            .init_options
            .take()
            .filter(serde_json::Value::is_object)
            .unwrap_or_else(|| serde_json::json!({}));
        if options.pointer("/tsserver/path").is_none() {
            if !options.get("tsserver").is_some_and(serde_json::Value::is_object) {
                options["tsserver"] = serde_json::json!({});
            }
            options["tsserver"]["path"] = serde_json::Value::String(lib.display().to_string());
        }
        self.init_options = Some(options);
        self
    }
}
