//! Linear-scan equivalents of the SQL path, used when no relational store
//! is configured. Predicate and ordering semantics mirror `db.rs` clause
//! for clause so both paths return the same totals and the same order over
//! identical rows.

use crate::executor::{CatalogStats, DimensionCount, STATS_LIST_LIMIT, TRENDING_WINDOW_DAYS};
use crate::filters::{normalize_lookup, GameFilter, GamePage, Pagination, Sort, SortField, SortOrder};
use crate::search::Suggestion;
use chrono::{DateTime, Duration, Utc};
use opengames_model::Game;
use std::cmp::Ordering;
use std::collections::BTreeMap;

fn matches_any_ci(value: Option<&str>, wanted: &[String]) -> bool {
    match value {
        Some(v) => wanted.iter().any(|w| v.eq_ignore_ascii_case(w)),
        None => false,
    }
}

pub(crate) fn matches_filter(game: &Game, filter: &GameFilter) -> bool {
    if let Some(languages) = &filter.languages {
        if !matches_any_ci(game.language.as_deref(), languages) {
            return false;
        }
    }
    if let Some(genres) = &filter.genres {
        if !matches_any_ci(game.genre.as_deref(), genres) {
            return false;
        }
    }
    if let Some(min_stars) = filter.min_stars {
        if game.stars < min_stars {
            return false;
        }
    }
    if let Some(max_stars) = filter.max_stars {
        if game.stars > max_stars {
            return false;
        }
    }
    if let Some(multiplayer) = filter.multiplayer {
        if game.is_multiplayer != multiplayer {
            return false;
        }
    }
    if let Some(topics) = &filter.topics {
        // OR across requested topics.
        let any = game
            .topics
            .iter()
            .any(|t| topics.iter().any(|w| t.eq_ignore_ascii_case(w)));
        if !any {
            return false;
        }
    }
    if let Some(platforms) = &filter.platforms {
        // AND across requested platforms.
        let all = platforms.iter().all(|w| {
            game.platforms
                .iter()
                .any(|p| p.eq_ignore_ascii_case(w))
        });
        if !all {
            return false;
        }
    }
    if let Some(has_release) = filter.has_release {
        if game.has_release() != has_release {
            return false;
        }
    }
    true
}

fn epoch_or_zero(ts: Option<DateTime<Utc>>) -> i64 {
    ts.map_or(0, |t| t.timestamp())
}

fn compare_by_field(a: &Game, b: &Game, field: SortField) -> Ordering {
    match field {
        SortField::Stars => a.stars.cmp(&b.stars),
        SortField::LastCommit => epoch_or_zero(a.last_commit).cmp(&epoch_or_zero(b.last_commit)),
        SortField::CreatedAt => epoch_or_zero(a.created_at).cmp(&epoch_or_zero(b.created_at)),
        SortField::Title => normalize_lookup(&a.title).cmp(&normalize_lookup(&b.title)),
        SortField::DownloadCount => a.downloads.cmp(&b.downloads),
    }
}

pub(crate) fn sort_games(games: &mut [Game], sort: Sort) {
    games.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, sort.field);
        let ordering = match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.slug.cmp(&b.slug))
    });
}

fn paginate(mut games: Vec<Game>, pagination: Pagination) -> GamePage {
    let total = games.len() as u64;
    let offset = pagination.offset() as usize;
    let items = if offset >= games.len() {
        Vec::new()
    } else {
        games
            .drain(..)
            .skip(offset)
            .take(pagination.page_size as usize)
            .collect()
    };
    GamePage { items, total }
}

pub fn list_games_in_memory(
    games: &[Game],
    filter: &GameFilter,
    sort: Sort,
    pagination: Pagination,
) -> GamePage {
    let mut matched: Vec<Game> = games
        .iter()
        .filter(|g| matches_filter(g, filter))
        .cloned()
        .collect();
    sort_games(&mut matched, sort);
    paginate(matched, pagination)
}

fn matches_query(game: &Game, needle: &str) -> bool {
    if game.title.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(description) = &game.description {
        if description.to_lowercase().contains(needle) {
            return true;
        }
    }
    game.topics.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Substring search over the in-memory catalog, stars descending.
pub fn search_in_memory(
    games: &[Game],
    query: &str,
    filter: &GameFilter,
    pagination: Pagination,
) -> GamePage {
    let needle = normalize_lookup(query.trim());
    let mut matched: Vec<Game> = games
        .iter()
        .filter(|g| matches_filter(g, filter) && matches_query(g, &needle))
        .cloned()
        .collect();
    sort_games(
        &mut matched,
        Sort {
            field: SortField::Stars,
            order: SortOrder::Desc,
        },
    );
    paginate(matched, pagination)
}

pub fn suggest_in_memory(games: &[Game], prefix: &str, limit: usize) -> Vec<Suggestion> {
    let prefix = normalize_lookup(prefix.trim());
    let mut matched: Vec<&Game> = games
        .iter()
        .filter(|g| normalize_lookup(&g.title).starts_with(&prefix))
        .collect();
    matched.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.slug.cmp(&b.slug)));
    matched
        .into_iter()
        .take(limit)
        .map(|g| Suggestion {
            title: g.title.clone(),
            slug: g.slug.as_str().to_string(),
        })
        .collect()
}

pub fn related_in_memory(games: &[Game], game: &Game, limit: usize) -> Vec<Game> {
    if game.genre.is_none() && game.topics.is_empty() {
        return Vec::new();
    }
    let mut matched: Vec<Game> = games
        .iter()
        .filter(|candidate| {
            if candidate.id == game.id {
                return false;
            }
            let same_genre = match (&candidate.genre, &game.genre) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            };
            let shared_topic = candidate.topics.iter().any(|t| {
                game.topics.iter().any(|w| t.eq_ignore_ascii_case(w))
            });
            same_genre || shared_topic
        })
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.slug.cmp(&b.slug)));
    matched.truncate(limit);
    matched
}

fn dimension_counts<'a>(
    games: &'a [Game],
    pick: impl Fn(&'a Game) -> Option<&'a str>,
) -> Vec<DimensionCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for game in games {
        if let Some(value) = pick(game) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    let mut out: Vec<DimensionCount> = counts
        .into_iter()
        .map(|(value, count)| DimensionCount {
            value: value.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    out
}

pub fn stats_in_memory(games: &[Game], now: DateTime<Utc>) -> CatalogStats {
    let window_start = now - Duration::days(TRENDING_WINDOW_DAYS);

    let mut trending: Vec<Game> = games
        .iter()
        .filter(|g| g.last_commit.is_some_and(|t| t >= window_start))
        .cloned()
        .collect();
    trending.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.slug.cmp(&b.slug)));
    trending.truncate(STATS_LIST_LIMIT as usize);

    let mut recently_updated: Vec<Game> = games
        .iter()
        .filter(|g| g.last_commit.is_some())
        .cloned()
        .collect();
    recently_updated.sort_by(|a, b| {
        epoch_or_zero(b.last_commit)
            .cmp(&epoch_or_zero(a.last_commit))
            .then_with(|| a.slug.cmp(&b.slug))
    });
    recently_updated.truncate(STATS_LIST_LIMIT as usize);

    CatalogStats {
        total_games: games.len() as u64,
        total_stars: games.iter().map(|g| g.stars).sum(),
        multiplayer_games: games.iter().filter(|g| g.is_multiplayer).count() as u64,
        archived_games: games.iter().filter(|g| g.is_archived).count() as u64,
        by_language: dimension_counts(games, |g| g.language.as_deref()),
        by_genre: dimension_counts(games, |g| g.genre.as_deref()),
        trending,
        recently_updated,
    }
}
