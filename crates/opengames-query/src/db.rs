// SPDX-License-Identifier: Apache-2.0

use crate::filters::{GameFilter, Sort, SortField, SortOrder};
use crate::store_error::StoreError;
use chrono::{DateTime, Utc};
use opengames_model::{DevicePick, Game, Slug};
use rusqlite::types::Value;
use rusqlite::Row;

/// Column list shared by every query that decodes a full `Game` row.
pub(crate) const GAME_COLUMNS: &str = "
    g.id, g.slug, g.title, g.description, g.homepage, g.repository_url,
    g.language, g.genre, g.stars, g.forks, g.downloads,
    g.created_at, g.last_commit, g.updated_at,
    g.is_archived, g.is_multiplayer, g.latest_release, g.thumbnail,
    g.screenshots, g.device_picks,
    COALESCE((SELECT group_concat(topic, ',') FROM
        (SELECT topic FROM game_topics WHERE game_id = g.id ORDER BY topic)), '') AS topics,
    COALESCE((SELECT group_concat(platform, ',') FROM
        (SELECT platform FROM game_platforms WHERE game_id = g.id ORDER BY platform)), '') AS platforms";

/// Appends one WHERE clause per set predicate. All clauses are ANDed by the
/// caller; topic membership is OR within its values, platform membership
/// requires every value.
pub(crate) fn push_filter_clauses(
    filter: &GameFilter,
    where_parts: &mut Vec<String>,
    params: &mut Vec<Value>,
) {
    if let Some(languages) = &filter.languages {
        where_parts.push(format!(
            "lower(g.language) IN ({})",
            placeholders(languages.len())
        ));
        params.extend(
            languages
                .iter()
                .map(|l| Value::Text(l.to_lowercase())),
        );
    }
    if let Some(genres) = &filter.genres {
        where_parts.push(format!("lower(g.genre) IN ({})", placeholders(genres.len())));
        params.extend(genres.iter().map(|v| Value::Text(v.to_lowercase())));
    }
    if let Some(min_stars) = filter.min_stars {
        where_parts.push("g.stars >= ?".to_string());
        params.push(Value::Integer(min_stars as i64));
    }
    if let Some(max_stars) = filter.max_stars {
        where_parts.push("g.stars <= ?".to_string());
        params.push(Value::Integer(max_stars as i64));
    }
    if let Some(multiplayer) = filter.multiplayer {
        where_parts.push("g.is_multiplayer = ?".to_string());
        params.push(Value::Integer(i64::from(multiplayer)));
    }
    if let Some(topics) = &filter.topics {
        where_parts.push(format!(
            "EXISTS (SELECT 1 FROM game_topics t WHERE t.game_id = g.id \
             AND lower(t.topic) IN ({}))",
            placeholders(topics.len())
        ));
        params.extend(topics.iter().map(|v| Value::Text(v.to_lowercase())));
    }
    if let Some(platforms) = &filter.platforms {
        for platform in platforms {
            where_parts.push(
                "EXISTS (SELECT 1 FROM game_platforms p WHERE p.game_id = g.id \
                 AND lower(p.platform) = ?)"
                    .to_string(),
            );
            params.push(Value::Text(platform.to_lowercase()));
        }
    }
    if let Some(has_release) = filter.has_release {
        if has_release {
            where_parts.push("g.latest_release IS NOT NULL".to_string());
        } else {
            where_parts.push("g.latest_release IS NULL".to_string());
        }
    }
}

fn placeholders(n: usize) -> String {
    let mut out = String::with_capacity(n * 3);
    for i in 0..n {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out
}

/// Absent timestamps sort as epoch zero; every ordering carries a stable
/// slug tie-break so repeated identical queries paginate identically.
pub(crate) fn order_by_clause(sort: Sort) -> String {
    let expr = match sort.field {
        SortField::Stars => "g.stars",
        SortField::LastCommit => "COALESCE(g.last_commit, 0)",
        SortField::CreatedAt => "COALESCE(g.created_at, 0)",
        SortField::Title => "g.title_normalized",
        SortField::DownloadCount => "g.downloads",
    };
    let dir = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {expr} {dir}, g.slug ASC")
}

pub(crate) fn build_list_sql(
    filter: &GameFilter,
    sort: Sort,
    limit: u64,
    offset: u64,
) -> (String, Vec<Value>) {
    let mut sql = format!("SELECT {GAME_COLUMNS} FROM games g");
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    push_filter_clauses(filter, &mut where_parts, &mut params);
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    sql.push_str(&order_by_clause(sort));
    sql.push_str(" LIMIT ? OFFSET ?");
    params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
    (sql, params)
}

pub(crate) fn build_count_sql(filter: &GameFilter) -> (String, Vec<Value>) {
    let mut sql = "SELECT COUNT(*) FROM games g".to_string();
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    push_filter_clauses(filter, &mut where_parts, &mut params);
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    (sql, params)
}

fn epoch_to_datetime(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}

fn split_tags(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').map(str::to_string).collect()
}

/// Decodes one `GAME_COLUMNS` row.
pub(crate) fn decode_game_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    let slug_raw: String = row.get(1)?;
    let slug = Slug::parse(&slug_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    let screenshots_raw: String = row.get(18)?;
    let screenshots: Vec<String> = serde_json::from_str(&screenshots_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(18, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let device_picks_raw: String = row.get(19)?;
    let device_picks: Vec<DevicePick> = serde_json::from_str(&device_picks_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(19, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let topics_raw: String = row.get(20)?;
    let platforms_raw: String = row.get(21)?;
    Ok(Game {
        id: row.get(0)?,
        slug,
        title: row.get(2)?,
        description: row.get(3)?,
        homepage: row.get(4)?,
        repository_url: row.get(5)?,
        language: row.get(6)?,
        genre: row.get(7)?,
        topics: split_tags(&topics_raw),
        platforms: split_tags(&platforms_raw),
        stars: row.get::<_, i64>(8)? as u64,
        forks: row.get::<_, i64>(9)? as u64,
        downloads: row.get::<_, i64>(10)? as u64,
        created_at: epoch_to_datetime(row.get(11)?),
        last_commit: epoch_to_datetime(row.get(12)?),
        updated_at: epoch_to_datetime(row.get(13)?),
        is_archived: row.get(14)?,
        is_multiplayer: row.get(15)?,
        latest_release: row.get(16)?,
        thumbnail: row.get(17)?,
        screenshots,
        device_picks,
    })
}

pub(crate) fn sql_err(e: rusqlite::Error) -> StoreError {
    StoreError::from(e)
}
