use super::*;
use chrono::{TimeZone, Utc};
use opengames_model::{Game, Slug};
use rusqlite::Connection;

fn store() -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    init_schema(&conn).expect("schema");
    load_catalog(&conn, &seed_catalog()).expect("seed");
    conn
}

fn store_with_fts() -> Connection {
    let conn = store();
    create_search_index(&conn).expect("fts index");
    conn
}

fn mini(id: i64, slug: &str, title: &str, stars: u64) -> Game {
    Game {
        id,
        slug: Slug::parse(slug).expect("slug"),
        title: title.to_string(),
        description: None,
        homepage: None,
        repository_url: format!("https://github.com/example/{slug}"),
        language: None,
        genre: None,
        topics: Vec::new(),
        platforms: Vec::new(),
        stars,
        forks: 0,
        downloads: 0,
        created_at: None,
        last_commit: None,
        updated_at: None,
        is_archived: false,
        is_multiplayer: false,
        latest_release: None,
        thumbnail: None,
        screenshots: Vec::new(),
        device_picks: Vec::new(),
    }
}

fn slugs(page: &GamePage) -> Vec<&str> {
    page.items.iter().map(|g| g.slug.as_str()).collect()
}

fn page(page: u64, page_size: u64) -> Pagination {
    Pagination { page, page_size }
}

#[test]
fn empty_filter_lists_everything_stars_descending() {
    let conn = store();
    let result = list_games(&conn, &GameFilter::default(), Sort::default(), page(1, 100))
        .expect("list");
    assert_eq!(result.total, 13);
    assert_eq!(result.items.len(), 13);
    assert_eq!(result.items[0].slug.as_str(), "mindustry");
    assert_eq!(result.items[1].slug.as_str(), "openra");
    assert!(result.items[0].stars >= result.items[1].stars);
}

#[test]
fn filters_are_conjunctive() {
    let conn = store();
    let filter = GameFilter {
        languages: Some(vec!["C++".to_string()]),
        min_stars: Some(5_000),
        ..GameFilter::default()
    };
    let result = list_games(&conn, &filter, Sort::default(), page(1, 100)).expect("list");
    assert_eq!(result.total, 5);
    for game in &result.items {
        assert_eq!(game.language.as_deref(), Some("C++"));
        assert!(game.stars >= 5_000);
    }
}

#[test]
fn language_match_is_case_insensitive() {
    let conn = store();
    let filter = GameFilter {
        languages: Some(vec!["rust".to_string()]),
        ..GameFilter::default()
    };
    let result = list_games(&conn, &filter, Sort::default(), page(1, 100)).expect("list");
    assert_eq!(slugs(&result), vec!["veloren"]);
}

#[test]
fn topic_membership_is_or_across_values() {
    let conn = store();
    let filter = GameFilter {
        topics: Some(vec!["retro".to_string(), "arcade".to_string()]),
        ..GameFilter::default()
    };
    let result = list_games(&conn, &filter, Sort::default(), page(1, 100)).expect("list");
    // openra + teeworlds + supertux carry only "retro", supertuxkart only
    // "arcade"; all four must match.
    assert_eq!(result.total, 4);
    assert!(slugs(&result).contains(&"openra"));
    assert!(slugs(&result).contains(&"supertuxkart"));
}

#[test]
fn platform_membership_requires_every_value() {
    let conn = Connection::open_in_memory().expect("open memory db");
    init_schema(&conn).expect("schema");
    let mut windows_only = mini(1, "win-only", "Windows Only", 50);
    windows_only.platforms = vec!["Windows".to_string()];
    let mut both = mini(2, "both", "Both Platforms", 10);
    both.platforms = vec!["Windows".to_string(), "Linux".to_string()];
    load_catalog(&conn, &[windows_only, both]).expect("seed");

    let filter = GameFilter {
        platforms: Some(vec!["Windows".to_string(), "Linux".to_string()]),
        ..GameFilter::default()
    };
    let result = list_games(&conn, &filter, Sort::default(), page(1, 100)).expect("list");
    assert_eq!(slugs(&result), vec!["both"]);
    assert_eq!(result.total, 1);
}

#[test]
fn has_release_filter_matches_presence_and_absence() {
    let conn = store();
    let with = GameFilter {
        has_release: Some(true),
        ..GameFilter::default()
    };
    let without = GameFilter {
        has_release: Some(false),
        ..GameFilter::default()
    };
    assert_eq!(
        list_games(&conn, &with, Sort::default(), page(1, 100))
            .expect("list")
            .total,
        12
    );
    let missing = list_games(&conn, &without, Sort::default(), page(1, 100)).expect("list");
    assert_eq!(slugs(&missing), vec!["teeworlds"]);
}

#[test]
fn star_range_is_inclusive_on_both_ends() {
    let conn = store();
    let filter = GameFilter {
        min_stars: Some(2_200),
        max_stars: Some(2_300),
        ..GameFilter::default()
    };
    let result = list_games(&conn, &filter, Sort::default(), page(1, 100)).expect("list");
    assert_eq!(slugs(&result), vec!["xonotic", "teeworlds"]);
}

#[test]
fn three_game_paging_scenario() {
    let conn = Connection::open_in_memory().expect("open memory db");
    init_schema(&conn).expect("schema");
    load_catalog(
        &conn,
        &[
            mini(1, "ten", "Ten", 10),
            mini(2, "fifty", "Fifty", 50),
            mini(3, "five", "Five", 5),
        ],
    )
    .expect("seed");

    let pagination = page(1, 2);
    let result =
        list_games(&conn, &GameFilter::default(), Sort::default(), pagination).expect("list");
    assert_eq!(slugs(&result), vec!["fifty", "ten"]);
    assert_eq!(result.total, 3);
    assert!(pagination.has_more(result.total));

    let last = list_games(&conn, &GameFilter::default(), Sort::default(), page(2, 2))
        .expect("list");
    assert_eq!(slugs(&last), vec!["five"]);
    assert!(!page(2, 2).has_more(last.total));
}

#[test]
fn equal_sort_keys_break_ties_by_slug() {
    let conn = Connection::open_in_memory().expect("open memory db");
    init_schema(&conn).expect("schema");
    load_catalog(
        &conn,
        &[
            mini(1, "zebra", "Zebra", 100),
            mini(2, "alpha", "Alpha", 100),
            mini(3, "mid", "Mid", 100),
        ],
    )
    .expect("seed");
    let result = list_games(&conn, &GameFilter::default(), Sort::default(), page(1, 10))
        .expect("list");
    assert_eq!(slugs(&result), vec!["alpha", "mid", "zebra"]);
}

#[test]
fn absent_timestamps_sort_as_epoch_zero() {
    let conn = store();
    let sort = Sort {
        field: SortField::LastCommit,
        order: SortOrder::Asc,
    };
    let result = list_games(&conn, &GameFilter::default(), sort, page(1, 100)).expect("list");
    // teeworlds has no last_commit and must sort before every dated row.
    assert_eq!(result.items[0].slug.as_str(), "teeworlds");
}

#[test]
fn identical_queries_return_identical_pages() {
    let conn = store();
    let filter = GameFilter {
        genres: Some(vec!["strategy".to_string()]),
        ..GameFilter::default()
    };
    let sort = Sort {
        field: SortField::Title,
        order: SortOrder::Asc,
    };
    let first = list_games(&conn, &filter, sort, page(1, 2)).expect("list");
    let second = list_games(&conn, &filter, sort, page(1, 2)).expect("list");
    assert_eq!(first, second);
}

#[test]
fn memory_path_matches_sql_path_over_identical_rows() {
    let conn = store();
    let catalog = seed_catalog();
    let cases = vec![
        GameFilter::default(),
        GameFilter {
            languages: Some(vec!["C++".to_string()]),
            min_stars: Some(5_000),
            ..GameFilter::default()
        },
        GameFilter {
            topics: Some(vec!["retro".to_string(), "arcade".to_string()]),
            ..GameFilter::default()
        },
        GameFilter {
            platforms: Some(vec!["Windows".to_string(), "Android".to_string()]),
            ..GameFilter::default()
        },
        GameFilter {
            multiplayer: Some(true),
            has_release: Some(true),
            ..GameFilter::default()
        },
    ];
    let sorts = [
        Sort::default(),
        Sort {
            field: SortField::Title,
            order: SortOrder::Asc,
        },
        Sort {
            field: SortField::LastCommit,
            order: SortOrder::Desc,
        },
    ];
    for filter in &cases {
        for sort in sorts {
            let sql = list_games(&conn, filter, sort, page(1, 100)).expect("sql path");
            let mem = list_games_in_memory(&catalog, filter, sort, page(1, 100));
            assert_eq!(sql.total, mem.total, "total mismatch for {filter:?}");
            assert_eq!(
                slugs(&sql),
                slugs(&mem),
                "order mismatch for {filter:?} {sort:?}"
            );
        }
    }
}

#[test]
fn fts_search_ranks_and_filters() {
    let conn = store_with_fts();
    let result = search_games(&conn, "voxel", &GameFilter::default(), page(1, 10))
        .expect("search");
    assert!(result.total >= 2);
    assert!(slugs(&result).contains(&"veloren"));
    assert!(slugs(&result).contains(&"luanti"));

    let java_only = GameFilter {
        languages: Some(vec!["Java".to_string()]),
        ..GameFilter::default()
    };
    let filtered = search_games(&conn, "strategy", &java_only, page(1, 10)).expect("search");
    assert_eq!(slugs(&filtered), vec!["mindustry"]);
}

#[test]
fn fts_user_input_cannot_inject_match_syntax() {
    let conn = store_with_fts();
    // Quote characters and operators must be neutralized, not parsed.
    let result = search_games(&conn, "\"voxel OR", &GameFilter::default(), page(1, 10))
        .expect("search");
    assert!(result.total <= 2);
}

#[test]
fn missing_search_index_is_reported_structurally() {
    let conn = store();
    let err = search_games(&conn, "voxel", &GameFilter::default(), page(1, 10))
        .expect_err("index absent");
    assert_eq!(err.kind, StoreErrorKind::MissingIndex);
    assert!(err.is_missing_index());
}

#[test]
fn fallback_search_is_substring_and_star_ranked() {
    let conn = store();
    let result = search_games_fallback(&conn, "tux", &GameFilter::default(), page(1, 10))
        .expect("fallback search");
    assert_eq!(slugs(&result), vec!["supertuxkart", "supertux"]);
    assert_eq!(result.total, 2);

    let mixed_case = search_games_fallback(&conn, "TUX", &GameFilter::default(), page(1, 10))
        .expect("fallback search");
    assert_eq!(mixed_case.total, 2);
}

#[test]
fn fallback_search_honors_filters() {
    let conn = store();
    let filter = GameFilter {
        min_stars: Some(3_000),
        ..GameFilter::default()
    };
    let result = search_games_fallback(&conn, "tux", &filter, page(1, 10)).expect("search");
    assert_eq!(slugs(&result), vec!["supertuxkart"]);
}

#[test]
fn fallback_search_matches_memory_search() {
    let conn = store();
    let catalog = seed_catalog();
    for query in ["tux", "voxel", "strategy", "zzz-no-match"] {
        let sql = search_games_fallback(&conn, query, &GameFilter::default(), page(1, 100))
            .expect("sql fallback");
        let mem = search_in_memory(&catalog, query, &GameFilter::default(), page(1, 100));
        assert_eq!(sql.total, mem.total, "total mismatch for {query}");
        assert_eq!(slugs(&sql), slugs(&mem), "order mismatch for {query}");
    }
}

#[test]
fn suggestions_are_prefix_matched_and_star_ranked() {
    let conn = store();
    let all = suggest_titles(&conn, "super", 10).expect("suggest");
    let titles: Vec<&str> = all.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["SuperTuxKart", "SuperTux"]);

    let capped = suggest_titles(&conn, "Super", 1).expect("suggest");
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].slug, "supertuxkart");

    let mem = suggest_in_memory(&seed_catalog(), "super", 10);
    assert_eq!(mem.len(), all.len());
}

#[test]
fn suggestion_prefix_wildcards_are_escaped() {
    let conn = store();
    let result = suggest_titles(&conn, "%", 10).expect("suggest");
    assert!(result.is_empty());
}

#[test]
fn slug_lookup_round_trips() {
    let conn = store();
    let slug = Slug::parse("veloren").expect("slug");
    let game = get_game_by_slug(&conn, &slug).expect("lookup").expect("present");
    assert_eq!(game.title, "Veloren");
    assert_eq!(game.language.as_deref(), Some("Rust"));
    assert_eq!(game.topics, vec!["rpg", "sandbox", "voxel"]);

    let absent = Slug::parse("not-a-game").expect("slug");
    assert!(get_game_by_slug(&conn, &absent).expect("lookup").is_none());
}

#[test]
fn decoded_rows_round_trip_optional_media() {
    let conn = store();
    let slug = Slug::parse("mindustry").expect("slug");
    let game = get_game_by_slug(&conn, &slug).expect("lookup").expect("present");
    assert_eq!(game.device_picks.len(), 1);
    assert_eq!(game.device_picks[0].name, "Steam Deck");
}

#[test]
fn related_games_share_genre_or_topic_best_starred_first() {
    let conn = store();
    let slug = Slug::parse("0ad").expect("slug");
    let game = get_game_by_slug(&conn, &slug).expect("lookup").expect("present");
    let related = related_games(&conn, &game, RELATED_LIMIT).expect("related");
    assert!(!related.is_empty());
    assert!(related.len() <= RELATED_LIMIT);
    assert_eq!(related[0].slug.as_str(), "mindustry");
    assert!(related.iter().all(|g| g.slug.as_str() != "0ad"));
    for pair in related.windows(2) {
        assert!(pair[0].stars >= pair[1].stars);
    }

    let mem = related_in_memory(&seed_catalog(), &game, RELATED_LIMIT);
    assert_eq!(
        related.iter().map(|g| g.slug.as_str()).collect::<Vec<_>>(),
        mem.iter().map(|g| g.slug.as_str()).collect::<Vec<_>>()
    );
}

#[test]
fn stats_aggregate_both_paths_identically() {
    let conn = store();
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let sql = catalog_stats(&conn, now).expect("stats");
    let mem = stats_in_memory(&seed_catalog(), now);

    assert_eq!(sql.total_games, 13);
    assert_eq!(sql.total_games, mem.total_games);
    assert_eq!(sql.total_stars, mem.total_stars);
    assert_eq!(sql.multiplayer_games, mem.multiplayer_games);
    assert_eq!(sql.archived_games, mem.archived_games);
    assert_eq!(sql.by_language, mem.by_language);
    assert_eq!(sql.by_genre, mem.by_genre);
    assert_eq!(sql.by_language[0].value, "C++");
    assert_eq!(sql.by_language[0].count, 8);
    assert_eq!(
        sql.trending.iter().map(|g| g.slug.as_str()).collect::<Vec<_>>(),
        mem.trending.iter().map(|g| g.slug.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(
        sql.recently_updated
            .iter()
            .map(|g| g.slug.as_str())
            .collect::<Vec<_>>(),
        mem.recently_updated
            .iter()
            .map(|g| g.slug.as_str())
            .collect::<Vec<_>>()
    );
    assert_eq!(sql.recently_updated[0].slug.as_str(), "luanti");
}

#[tokio::test]
async fn fallback_catalog_is_memoized_single_flight() {
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(tokio::spawn(fallback_catalog()));
    }
    let mut first: Option<std::sync::Arc<Vec<Game>>> = None;
    for handle in handles {
        let catalog = handle.await.expect("join");
        assert_eq!(catalog.len(), 13);
        if let Some(prev) = &first {
            assert!(std::sync::Arc::ptr_eq(prev, &catalog));
        } else {
            first = Some(catalog);
        }
    }
}

#[test]
fn reindex_counts_indexed_rows() {
    let conn = store();
    assert!(!search_index_present(&conn).expect("probe"));
    let indexed = create_search_index(&conn).expect("reindex");
    assert_eq!(indexed, 13);
    assert!(search_index_present(&conn).expect("probe"));
}
