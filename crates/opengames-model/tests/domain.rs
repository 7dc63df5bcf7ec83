use opengames_model::{builtin_categories, sha256_hex, CategoryKind, Slug};
use std::collections::BTreeSet;

#[test]
fn slug_accepts_lowercase_alphanumerics_and_hyphens() {
    for ok in ["0ad", "supertuxkart", "battle-for-wesnoth", "a-2-b"] {
        assert!(Slug::parse(ok).is_ok(), "expected valid slug: {ok}");
    }
}

#[test]
fn slug_rejects_malformed_input() {
    for bad in [
        "",
        "  ",
        "UpperCase",
        "space here",
        "-leading",
        "trailing-",
        "uni\u{00e9}code",
        "semi;colon",
    ] {
        assert!(Slug::parse(bad).is_err(), "expected invalid slug: {bad:?}");
    }
}

#[test]
fn slug_trims_surrounding_whitespace() {
    let slug = Slug::parse("  veloren  ").expect("trimmed slug parses");
    assert_eq!(slug.as_str(), "veloren");
}

#[test]
fn slug_length_is_bounded() {
    let long = "a".repeat(opengames_model::SLUG_MAX_LEN + 1);
    assert!(Slug::parse(&long).is_err());
}

#[test]
fn builtin_categories_have_unique_slugs() {
    let categories = builtin_categories();
    assert!(!categories.is_empty());
    let slugs: BTreeSet<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs.len(), categories.len(), "duplicate category slug");
}

#[test]
fn builtin_categories_survive_slug_validation() {
    // The list is filter_map'ed over Slug::parse; a typo in a preset slug
    // would silently shrink the list. Pin the expected size.
    assert_eq!(builtin_categories().len(), 15);
}

#[test]
fn builtin_categories_cover_each_kind_in_use() {
    let kinds: BTreeSet<&str> = builtin_categories()
        .iter()
        .map(|c| c.kind.as_str())
        .collect();
    for kind in ["genre", "language", "engine", "platform", "special"] {
        assert!(kinds.contains(kind), "missing category kind: {kind}");
    }
}

#[test]
fn category_kind_round_trips_through_parse() {
    for kind in [
        CategoryKind::Genre,
        CategoryKind::Language,
        CategoryKind::Engine,
        CategoryKind::Platform,
        CategoryKind::Alternative,
        CategoryKind::Special,
    ] {
        assert_eq!(CategoryKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(CategoryKind::parse("bogus"), None);
}

#[test]
fn sha256_hex_is_stable() {
    assert_eq!(
        sha256_hex(b"opengames"),
        "7a54560ea6001074a0bf324bbc8761c17ce90edb41e018ecdbeda17b8ad4ef43"
    );
}
