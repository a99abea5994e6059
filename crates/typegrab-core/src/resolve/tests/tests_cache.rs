//! Tests for the last-hover cache

use std::path::Path;

use crate::engine::TextRange;
use crate::line_index::Position;
use crate::resolve::{DEFAULT_TOLERANCE, HoverCache, RenderedType};
use rstest::rstest;

fn rendered(text: &str) -> RenderedType {
    RenderedType {
        text: text.to_string(),
        node_range: TextRange::new(0, 1),
        from_parent: false,
    }
}

#[test]
fn test_empty_cache_misses() {
    let cache = HoverCache::default();
    assert!(cache.lookup(Path::new("/a.ts"), Position::new(0, 0)).is_none());
    assert_eq!(cache.tolerance(), DEFAULT_TOLERANCE);
}

#[rstest]
#[case(20, true)]
#[case(30, true)]
#[case(10, true)]
#[case(31, false)]
#[case(9, false)]
fn test_same_line_within_tolerance_hits(#[case] character: u32, #[case] hit: bool) {
    let mut cache = HoverCache::new(10);
    cache.store(Path::new("/a.ts"), Position::new(4, 20), rendered("string"));

    let found = cache.lookup(Path::new("/a.ts"), Position::new(4, character));

    assert_eq!(found.is_some(), hit);
}

#[test]
fn test_other_line_misses() {
    let mut cache = HoverCache::new(10);
    cache.store(Path::new("/a.ts"), Position::new(4, 20), rendered("string"));
    assert!(cache.lookup(Path::new("/a.ts"), Position::new(5, 20)).is_none());
}

#[test]
fn test_other_file_misses() {
    let mut cache = HoverCache::new(10);
    cache.store(Path::new("/a.ts"), Position::new(4, 20), rendered("string"));
    assert!(cache.lookup(Path::new("/b.ts"), Position::new(4, 20)).is_none());
}

#[test]
fn test_store_replaces_previous_entry() {
    let mut cache = HoverCache::new(10);
    cache.store(Path::new("/a.ts"), Position::new(0, 0), rendered("string"));
    cache.store(Path::new("/a.ts"), Position::new(9, 0), rendered("number"));

    assert!(cache.lookup(Path::new("/a.ts"), Position::new(0, 0)).is_none());
    assert_eq!(
        cache
            .lookup(Path::new("/a.ts"), Position::new(9, 2))
            .map(|r| r.text.as_str()),
        Some("number")
    );
}

#[test]
fn test_zero_tolerance_requires_exact_column() {
    let mut cache = HoverCache::new(0);
    cache.store(Path::new("/a.ts"), Position::new(1, 5), rendered("string"));
    assert!(cache.lookup(Path::new("/a.ts"), Position::new(1, 5)).is_some());
    assert!(cache.lookup(Path::new("/a.ts"), Position::new(1, 6)).is_none());
}

#[test]
fn test_clear() {
    let mut cache = HoverCache::default();
    cache.store(Path::new("/a.ts"), Position::new(1, 5), rendered("string"));
    cache.clear();
    assert!(cache.lookup(Path::new("/a.ts"), Position::new(1, 5)).is_none());
}
