use opengames_api::params::{
    parse_filters, parse_pagination, parse_search_query, parse_sort, suggest_limit,
    wants_suggestions, MIN_QUERY_LEN,
};
use opengames_api::ApiErrorCode;
use opengames_query::{GameFilter, SortField, SortOrder};

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn pagination_defaults_when_absent() {
    let p = parse_pagination(&[]);
    assert_eq!(p.page, 1);
    assert_eq!(p.page_size, 20);
    assert_eq!(p.offset(), 0);
}

#[test]
fn pagination_bounds_hold_for_malformed_input() {
    for (page, page_size) in [
        ("abc", "xyz"),
        ("-3", "9999"),
        ("0", "0"),
        ("", ""),
        ("2.5", "1e9"),
        ("99999999999999999999", "-1"),
    ] {
        let p = parse_pagination(&pairs(&[("page", page), ("pageSize", page_size)]));
        assert!(p.page >= 1, "page bound violated for {page:?}");
        assert!(
            p.page_size >= 1 && p.page_size <= 100,
            "pageSize bound violated for {page_size:?}"
        );
    }
}

#[test]
fn page_size_clamps_and_accepts_limit_alias() {
    assert_eq!(
        parse_pagination(&pairs(&[("pageSize", "9999")])).page_size,
        100
    );
    assert_eq!(parse_pagination(&pairs(&[("limit", "5")])).page_size, 5);
    // pageSize wins over the alias when both are present.
    assert_eq!(
        parse_pagination(&pairs(&[("pageSize", "7"), ("limit", "3")])).page_size,
        7
    );
}

#[test]
fn offset_derives_from_page_and_size() {
    let p = parse_pagination(&pairs(&[("page", "3"), ("pageSize", "25")]));
    assert_eq!(p.offset(), 50);
}

#[test]
fn sort_discards_unknown_fields_and_orders() {
    let default = parse_sort(&[]);
    assert_eq!(default.field, SortField::Stars);
    assert_eq!(default.order, SortOrder::Desc);

    let bogus = parse_sort(&pairs(&[("sort", "popularity"), ("order", "sideways")]));
    assert_eq!(bogus.field, SortField::Stars);
    assert_eq!(bogus.order, SortOrder::Desc);

    let valid = parse_sort(&pairs(&[("sort", "lastCommit"), ("order", "asc")]));
    assert_eq!(valid.field, SortField::LastCommit);
    assert_eq!(valid.order, SortOrder::Asc);
}

#[test]
fn absent_filter_keys_leave_predicates_unset() {
    let filter = parse_filters(&[]);
    assert_eq!(filter, GameFilter::default());
    assert!(filter.is_empty());
}

#[test]
fn repeated_keys_and_comma_lists_are_equivalent() {
    let repeated = parse_filters(&pairs(&[("topic", "retro"), ("topic", "arcade")]));
    let comma = parse_filters(&pairs(&[("topic", "retro,arcade")]));
    assert_eq!(repeated.topics, comma.topics);
    assert_eq!(
        repeated.topics,
        Some(vec!["retro".to_string(), "arcade".to_string()])
    );
}

#[test]
fn numeric_filters_ignore_non_numeric_input() {
    let filter = parse_filters(&pairs(&[("minStars", "many"), ("maxStars", "100")]));
    assert_eq!(filter.min_stars, None);
    assert_eq!(filter.max_stars, Some(100));
}

#[test]
fn boolean_filters_accept_only_literal_true_false() {
    assert_eq!(
        parse_filters(&pairs(&[("multiplayer", "true")])).multiplayer,
        Some(true)
    );
    assert_eq!(
        parse_filters(&pairs(&[("multiplayer", "false")])).multiplayer,
        Some(false)
    );
    for junk in ["TRUE", "1", "yes", ""] {
        assert_eq!(
            parse_filters(&pairs(&[("multiplayer", junk)])).multiplayer,
            None,
            "expected {junk:?} to be discarded"
        );
    }
    assert_eq!(
        parse_filters(&pairs(&[("hasRelease", "true")])).has_release,
        Some(true)
    );
}

#[test]
fn filter_values_are_trimmed_and_empties_dropped() {
    let filter = parse_filters(&pairs(&[("language", " Rust , ,C++ ")]));
    assert_eq!(
        filter.languages,
        Some(vec!["Rust".to_string(), "C++".to_string()])
    );
    assert_eq!(parse_filters(&pairs(&[("language", " , ")])).languages, None);
}

#[test]
fn search_query_validation_boundaries() {
    let missing = parse_search_query(&[]).expect_err("missing q");
    assert_eq!(missing.code, ApiErrorCode::MissingQueryParameter);
    assert_eq!(missing.http_status(), 400);

    let empty = parse_search_query(&pairs(&[("q", "")])).expect_err("empty q");
    assert_eq!(empty.http_status(), 400);

    let short = parse_search_query(&pairs(&[("q", "a")])).expect_err("one char");
    assert_eq!(short.code, ApiErrorCode::QueryTooShort);

    let padded = parse_search_query(&pairs(&[("q", "  a  ")])).expect_err("pad to one char");
    assert_eq!(padded.code, ApiErrorCode::QueryTooShort);

    let ok = parse_search_query(&pairs(&[("q", "ab")])).expect("two chars accepted");
    assert_eq!(ok, "ab");
    assert_eq!(MIN_QUERY_LEN, 2);
}

#[test]
fn suggest_flag_and_limit() {
    assert!(wants_suggestions(&pairs(&[("suggest", "true")])));
    assert!(wants_suggestions(&pairs(&[("suggest", "1")])));
    assert!(!wants_suggestions(&pairs(&[("suggest", "no")])));
    assert!(!wants_suggestions(&[]));

    assert_eq!(suggest_limit(&[]), 10);
    assert_eq!(suggest_limit(&pairs(&[("limit", "3")])), 3);
    assert_eq!(suggest_limit(&pairs(&[("limit", "500")])), 25);
}
