//! Project manifest lookup and option expansion

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use crate::engine::CompilerOptions;

/// Manifest file names, in lookup order within one directory
pub const DEFAULT_MANIFEST_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// Longest `extends` chain followed before giving up
const MAX_EXTENDS_DEPTH: usize = 8;

/// Find the nearest manifest in `start_dir` or any of its ancestors
#[must_use]
pub fn find_manifest(start_dir: &Path) -> Option<PathBuf> {
    start_dir.ancestors().find_map(|dir| {
        DEFAULT_MANIFEST_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Options used when a file has no manifest: modern target, node module
/// resolution, React JSX, and lenient checking so untyped code still resolves.
#[must_use]
pub fn default_options() -> CompilerOptions {
    [
        ("target", Value::from("ES2020")),
        ("module", Value::from("commonjs")),
        ("moduleResolution", Value::from("node")),
        ("jsx", Value::from("react")),
        ("allowJs", Value::Bool(true)),
        ("checkJs", Value::Bool(false)),
        ("strict", Value::Bool(false)),
        ("noImplicitAny", Value::Bool(false)),
        ("esModuleInterop", Value::Bool(true)),
        ("skipLibCheck", Value::Bool(true)),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

/// Read a manifest and expand its `compilerOptions`, following `extends`.
///
/// Options from a base manifest are overridden by the manifest extending it.
///
/// # Errors
/// Returns an error if a manifest in the chain is unreadable or malformed,
/// an `extends` target cannot be found, or the chain is circular.
pub fn parse_manifest(path: &Path) -> Result<CompilerOptions> {
    let mut chain = Vec::new();
    load_options(path, &mut chain)
}

fn load_options(path: &Path, chain: &mut Vec<PathBuf>) -> Result<CompilerOptions> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to locate manifest {}", path.display()))?;
    if chain.contains(&canonical) {
        bail!("Circular extends chain at {}", canonical.display());
    }
    if chain.len() >= MAX_EXTENDS_DEPTH {
        bail!("Extends chain deeper than {} at {}", MAX_EXTENDS_DEPTH, canonical.display());
    }

    let text = std::fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read manifest {}", canonical.display()))?;
    let value: Value = serde_json::from_str(&strip_json_comments(&text))
        .with_context(|| format!("Malformed manifest {}", canonical.display()))?;

    let base_dir = canonical
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    chain.push(canonical.clone());
    let mut options = CompilerOptions::new();
    for spec in extends_entries(&value) {
        let base = resolve_extends(&base_dir, spec).ok_or_else(|| {
            anyhow!(
                "Cannot resolve extends \"{}\" in {}",
                spec,
                canonical.display()
            )
        })?;
        options.extend(load_options(&base, chain)?);
    }
    chain.pop();

    if let Some(own) = value.get("compilerOptions").and_then(Value::as_object) {
        options.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Ok(options)
}

fn extends_entries(value: &Value) -> Vec<&str> {
    match value.get("extends") {
        Some(Value::String(spec)) => vec![spec.as_str()],
        Some(Value::Array(specs)) => specs.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn resolve_extends(base_dir: &Path, spec: &str) -> Option<PathBuf> {
    let is_relative = spec.starts_with("./") || spec.starts_with("../");
    if is_relative || Path::new(spec).is_absolute() {
        let target = base_dir.join(spec);
        return [with_json_suffix(&target), target]
            .into_iter()
            .find(|p| p.is_file());
    }

    // Package specifier: look in node_modules of every ancestor
    base_dir.ancestors().find_map(|dir| {
        let target = dir.join("node_modules").join(spec);
        [
            target.clone(),
            with_json_suffix(&target),
            target.join("tsconfig.json"),
        ]
        .into_iter()
        .find(|p| p.is_file())
    })
}

fn with_json_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

/// Strip `//` and `/* */` comments and trailing commas so a manifest written
/// in the relaxed JSON dialect parses as plain JSON
#[must_use]
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
