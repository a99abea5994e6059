//! Tests for source kind detection

use crate::project::SourceKind;
use rstest::rstest;
use std::path::Path;

#[rstest]
#[case("ts", SourceKind::TypeScript)]
#[case("mts", SourceKind::TypeScript)]
#[case("cts", SourceKind::TypeScript)]
#[case("tsx", SourceKind::Tsx)]
#[case("js", SourceKind::JavaScript)]
#[case("mjs", SourceKind::JavaScript)]
#[case("cjs", SourceKind::JavaScript)]
#[case("jsx", SourceKind::Jsx)]
#[case("vue", SourceKind::Vue)]
#[case("svelte", SourceKind::Svelte)]
fn test_from_extension_recognizes_allowed_extensions(
    #[case] ext: &str,
    #[case] expected: SourceKind,
) {
    assert_eq!(SourceKind::from_extension(ext), Some(expected));
}

#[test]
fn test_from_extension_is_case_insensitive() {
    assert_eq!(SourceKind::from_extension("TS"), Some(SourceKind::TypeScript));
    assert_eq!(SourceKind::from_extension("Jsx"), Some(SourceKind::Jsx));
}

#[rstest]
#[case("rs")]
#[case("json")]
#[case("md")]
#[case("")]
fn test_from_extension_rejects_other_extensions(#[case] ext: &str) {
    assert_eq!(SourceKind::from_extension(ext), None);
}

#[test]
fn test_from_path() {
    assert_eq!(
        SourceKind::from_path(Path::new("src/app/main.tsx")),
        Some(SourceKind::Tsx)
    );
    assert_eq!(SourceKind::from_path(Path::new("types.d.ts")), Some(SourceKind::TypeScript));
    assert_eq!(SourceKind::from_path(Path::new("Makefile")), None);
}

#[test]
fn test_extensions_round_trip_through_from_extension() {
    for kind in [
        SourceKind::TypeScript,
        SourceKind::Tsx,
        SourceKind::JavaScript,
        SourceKind::Jsx,
        SourceKind::Vue,
        SourceKind::Svelte,
    ] {
        for ext in kind.extensions() {
            assert_eq!(SourceKind::from_extension(ext), Some(kind));
        }
    }
}

#[test]
fn test_display_uses_language_id() {
    assert_eq!(SourceKind::Tsx.to_string(), "typescriptreact");
    assert_eq!(SourceKind::JavaScript.to_string(), "javascript");
}
