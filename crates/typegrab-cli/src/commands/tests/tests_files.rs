//! Tests for the files command

#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;
use typegrab_core::WalkConfig;

use crate::commands::files::collect;

#[test]
fn test_collect_lists_sources_from_manifest_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().canonicalize().unwrap();
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("tsconfig.json"), "{}").unwrap();
    fs::write(root.join("src/a.ts"), "").unwrap();
    fs::write(root.join("src/nested/b.jsx"), "").unwrap();
    fs::write(root.join("src/readme.md"), "").unwrap();
    fs::write(root.join("node_modules/pkg/index.ts"), "").unwrap();

    let files = collect(&root.join("src/nested"), &WalkConfig::default()).unwrap();

    let mut paths: Vec<_> = files.paths().map(|p| p.to_path_buf()).collect();
    paths.sort();
    assert_eq!(paths, vec![root.join("src/a.ts"), root.join("src/nested/b.jsx")]);
    assert!(!files.truncated);
}

#[test]
fn test_collect_respects_max_files() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..5 {
        fs::write(temp_dir.path().join(format!("f{i}.ts")), "").unwrap();
    }

    let files = collect(temp_dir.path(), &WalkConfig::default().with_max_files(2)).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.truncated);
}

#[test]
fn test_collect_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    assert!(collect(&temp_dir.path().join("missing"), &WalkConfig::default()).is_err());
}
