// SPDX-License-Identifier: Apache-2.0

//! Total parsing of raw query-string pairs into typed request structures.
//!
//! Parsing never fails: malformed values fall back to defaults and absent
//! keys leave the matching predicate unset. The single exception is the
//! search query itself, which is validated at the boundary.

use crate::errors::ApiError;
use opengames_query::{
    GameFilter, Pagination, Sort, SortField, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

pub const MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_SUGGEST_LIMIT: usize = 10;
pub const MAX_SUGGEST_LIMIT: usize = 25;

fn first<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Collects every occurrence of `key`, splitting comma-separated values.
/// `topic=retro&topic=arcade` and `topic=retro,arcade` are equivalent.
fn multi_values(query: &[(String, String)], key: &str) -> Option<Vec<String>> {
    let values: Vec<String> = query
        .iter()
        .filter(|(k, _)| k == key)
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn parse_pagination(query: &[(String, String)]) -> Pagination {
    let page = first(query, "page")
        .and_then(|v| v.parse::<i64>().ok())
        .map_or(1, |p| p.max(1)) as u64;
    let page_size = first(query, "pageSize")
        .or_else(|| first(query, "limit"))
        .and_then(|v| v.parse::<i64>().ok())
        .map_or(DEFAULT_PAGE_SIZE, |v| {
            v.clamp(1, MAX_PAGE_SIZE as i64) as u64
        });
    Pagination { page, page_size }
}

pub fn parse_sort(query: &[(String, String)]) -> Sort {
    let field = first(query, "sort")
        .and_then(SortField::parse)
        .unwrap_or(SortField::Stars);
    let order = match first(query, "order") {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };
    Sort { field, order }
}

pub fn parse_filters(query: &[(String, String)]) -> GameFilter {
    GameFilter {
        languages: multi_values(query, "language"),
        genres: multi_values(query, "genre"),
        min_stars: first(query, "minStars").and_then(|v| v.parse::<u64>().ok()),
        max_stars: first(query, "maxStars").and_then(|v| v.parse::<u64>().ok()),
        multiplayer: first(query, "multiplayer").and_then(parse_bool_literal),
        topics: multi_values(query, "topic"),
        platforms: multi_values(query, "platform"),
        has_release: first(query, "hasRelease").and_then(parse_bool_literal),
    }
}

/// The search query must be non-empty after trimming and at least
/// [`MIN_QUERY_LEN`] characters.
pub fn parse_search_query(query: &[(String, String)]) -> Result<String, ApiError> {
    let raw = first(query, "q").ok_or_else(|| ApiError::missing_param("q"))?;
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(ApiError::query_too_short(MIN_QUERY_LEN));
    }
    Ok(trimmed.to_string())
}

pub fn wants_suggestions(query: &[(String, String)]) -> bool {
    first(query, "suggest").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

pub fn suggest_limit(query: &[(String, String)]) -> usize {
    first(query, "limit")
        .and_then(|v| v.parse::<i64>().ok())
        .map_or(DEFAULT_SUGGEST_LIMIT, |v| {
            v.clamp(1, MAX_SUGGEST_LIMIT as i64) as usize
        })
}
