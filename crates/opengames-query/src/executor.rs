// SPDX-License-Identifier: Apache-2.0

use crate::db::{build_count_sql, build_list_sql, decode_game_row, sql_err, GAME_COLUMNS};
use crate::filters::{GameFilter, GamePage, Pagination, Sort};
use crate::store_error::StoreError;
use chrono::{DateTime, Duration, Utc};
use opengames_model::{Game, Slug};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::Serialize;

pub const RELATED_LIMIT: usize = 6;
pub(crate) const STATS_LIST_LIMIT: u64 = 10;
pub(crate) const TRENDING_WINDOW_DAYS: i64 = 90;

/// Filtered, sorted, paginated listing with the full match count.
pub fn list_games(
    conn: &Connection,
    filter: &GameFilter,
    sort: Sort,
    pagination: Pagination,
) -> Result<GamePage, StoreError> {
    let total = count_games(conn, filter)?;
    let (sql, params) = build_list_sql(filter, sort, pagination.page_size, pagination.offset());
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let items = stmt
        .query_map(params_from_iter(params.iter()), decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(GamePage { items, total })
}

fn count_games(conn: &Connection, filter: &GameFilter) -> Result<u64, StoreError> {
    let (sql, params) = build_count_sql(filter);
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let total: i64 = stmt
        .query_row(params_from_iter(params.iter()), |row| row.get(0))
        .map_err(sql_err)?;
    Ok(total as u64)
}

pub fn get_game_by_slug(conn: &Connection, slug: &Slug) -> Result<Option<Game>, StoreError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.slug = ?");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let mut rows = stmt
        .query_map(params![slug.as_str()], decode_game_row)
        .map_err(sql_err)?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(sql_err)?)),
        None => Ok(None),
    }
}

/// Games sharing a genre or at least one topic with `game`, best-starred
/// first, excluding the game itself.
pub fn related_games(
    conn: &Connection,
    game: &Game,
    limit: usize,
) -> Result<Vec<Game>, StoreError> {
    let mut related_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = vec![Value::Integer(game.id)];
    if let Some(genre) = &game.genre {
        related_parts.push("lower(g.genre) = ?".to_string());
        params.push(Value::Text(genre.to_lowercase()));
    }
    if !game.topics.is_empty() {
        let mut placeholders = String::new();
        for (i, topic) in game.topics.iter().enumerate() {
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push('?');
            params.push(Value::Text(topic.to_lowercase()));
        }
        related_parts.push(format!(
            "EXISTS (SELECT 1 FROM game_topics t WHERE t.game_id = g.id \
             AND lower(t.topic) IN ({placeholders}))"
        ));
    }
    if related_parts.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE g.id != ? AND ({}) \
         ORDER BY g.stars DESC, g.slug ASC LIMIT ?",
        related_parts.join(" OR ")
    );
    params.push(Value::Integer(limit as i64));
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let items = stmt
        .query_map(params_from_iter(params.iter()), decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(items)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_games: u64,
    pub total_stars: u64,
    pub multiplayer_games: u64,
    pub archived_games: u64,
    pub by_language: Vec<DimensionCount>,
    pub by_genre: Vec<DimensionCount>,
    pub trending: Vec<Game>,
    pub recently_updated: Vec<Game>,
}

fn dimension_counts(conn: &Connection, column: &str) -> Result<Vec<DimensionCount>, StoreError> {
    let sql = format!(
        "SELECT g.{column}, COUNT(*) FROM games g WHERE g.{column} IS NOT NULL \
         GROUP BY g.{column} ORDER BY COUNT(*) DESC, g.{column} ASC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DimensionCount {
                value: row.get(0)?,
                count: row.get::<_, i64>(1)? as u64,
            })
        })
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(rows)
}

/// Aggregate counts plus trending and recently-updated lists.
///
/// `now` is passed in so the trending window is a pure function of its
/// inputs.
pub fn catalog_stats(conn: &Connection, now: DateTime<Utc>) -> Result<CatalogStats, StoreError> {
    let (total_games, total_stars, multiplayer_games, archived_games) = conn
        .query_row(
            "SELECT COUNT(*), COALESCE(SUM(stars), 0),
                    COALESCE(SUM(is_multiplayer), 0), COALESCE(SUM(is_archived), 0)
             FROM games",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, i64>(1)? as u64,
                    row.get::<_, i64>(2)? as u64,
                    row.get::<_, i64>(3)? as u64,
                ))
            },
        )
        .map_err(sql_err)?;

    let window_start = (now - Duration::days(TRENDING_WINDOW_DAYS)).timestamp();
    let trending_sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE g.last_commit >= ? \
         ORDER BY g.stars DESC, g.slug ASC LIMIT ?"
    );
    let mut stmt = conn.prepare_cached(&trending_sql).map_err(sql_err)?;
    let trending = stmt
        .query_map(params![window_start, STATS_LIST_LIMIT as i64], decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;

    let recent_sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE g.last_commit IS NOT NULL \
         ORDER BY g.last_commit DESC, g.slug ASC LIMIT ?"
    );
    let mut stmt = conn.prepare_cached(&recent_sql).map_err(sql_err)?;
    let recently_updated = stmt
        .query_map(params![STATS_LIST_LIMIT as i64], decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;

    Ok(CatalogStats {
        total_games,
        total_stars,
        multiplayer_games,
        archived_games,
        by_language: dimension_counts(conn, "language")?,
        by_genre: dimension_counts(conn, "genre")?,
        trending,
        recently_updated,
    })
}
