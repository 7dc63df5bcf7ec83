// SPDX-License-Identifier: Apache-2.0

use crate::db::{decode_game_row, push_filter_clauses, sql_err, GAME_COLUMNS};
use crate::filters::{escape_like_prefix, normalize_lookup, GameFilter, GamePage, Pagination};
use crate::schema::search_index_present;
use crate::store_error::StoreError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suggestion {
    pub title: String,
    pub slug: String,
}

/// Quotes each whitespace token so user input cannot inject FTS5 query
/// syntax. Tokens are implicitly ANDed.
fn fts_match_expr(query: &str) -> String {
    query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indexed full-text search, relevance-ranked, honoring the same filter set
/// and pagination as listing.
///
/// Returns `StoreErrorKind::MissingIndex` when the FTS table has not been
/// provisioned; callers may recover from exactly that kind by switching to
/// [`search_games_fallback`]. Every other failure propagates unmodified.
pub fn search_games(
    conn: &Connection,
    query: &str,
    filter: &GameFilter,
    pagination: Pagination,
) -> Result<GamePage, StoreError> {
    if !search_index_present(conn)? {
        return Err(StoreError::missing_index());
    }
    let match_expr = fts_match_expr(query);

    let mut where_parts: Vec<String> = vec!["games_fts MATCH ?".to_string()];
    let mut params: Vec<Value> = vec![Value::Text(match_expr)];
    push_filter_clauses(filter, &mut where_parts, &mut params);
    let where_sql = where_parts.join(" AND ");

    let count_sql = format!(
        "SELECT COUNT(*) FROM games_fts JOIN games g ON g.id = games_fts.rowid \
         WHERE {where_sql}"
    );
    let mut stmt = conn.prepare_cached(&count_sql).map_err(sql_err)?;
    let total: i64 = stmt
        .query_row(params_from_iter(params.iter()), |row| row.get(0))
        .map_err(sql_err)?;

    let page_sql = format!(
        "SELECT {GAME_COLUMNS} FROM games_fts JOIN games g ON g.id = games_fts.rowid \
         WHERE {where_sql} \
         ORDER BY bm25(games_fts) ASC, g.stars DESC, g.slug ASC LIMIT ? OFFSET ?"
    );
    params.push(Value::Integer(pagination.page_size as i64));
    params.push(Value::Integer(pagination.offset() as i64));
    let mut stmt = conn.prepare_cached(&page_sql).map_err(sql_err)?;
    let items = stmt
        .query_map(params_from_iter(params.iter()), decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;

    Ok(GamePage {
        items,
        total: total as u64,
    })
}

/// Degraded search path for the missing-index condition: case-insensitive
/// substring match over title, description, and topic text, star count
/// descending as the relevance proxy.
pub fn search_games_fallback(
    conn: &Connection,
    query: &str,
    filter: &GameFilter,
    pagination: Pagination,
) -> Result<GamePage, StoreError> {
    let needle = normalize_lookup(query.trim());

    let mut where_parts: Vec<String> = vec![
        "(instr(lower(g.title), ?) > 0 \
          OR instr(lower(COALESCE(g.description, '')), ?) > 0 \
          OR EXISTS (SELECT 1 FROM game_topics t WHERE t.game_id = g.id \
              AND instr(lower(t.topic), ?) > 0))"
            .to_string(),
    ];
    let mut params: Vec<Value> = vec![
        Value::Text(needle.clone()),
        Value::Text(needle.clone()),
        Value::Text(needle),
    ];
    push_filter_clauses(filter, &mut where_parts, &mut params);
    let where_sql = where_parts.join(" AND ");

    let count_sql = format!("SELECT COUNT(*) FROM games g WHERE {where_sql}");
    let mut stmt = conn.prepare_cached(&count_sql).map_err(sql_err)?;
    let total: i64 = stmt
        .query_row(params_from_iter(params.iter()), |row| row.get(0))
        .map_err(sql_err)?;

    let page_sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE {where_sql} \
         ORDER BY g.stars DESC, g.slug ASC LIMIT ? OFFSET ?"
    );
    params.push(Value::Integer(pagination.page_size as i64));
    params.push(Value::Integer(pagination.offset() as i64));
    let mut stmt = conn.prepare_cached(&page_sql).map_err(sql_err)?;
    let items = stmt
        .query_map(params_from_iter(params.iter()), decode_game_row)
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;

    Ok(GamePage {
        items,
        total: total as u64,
    })
}

/// Case-insensitive prefix match on title, stars descending, capped.
pub fn suggest_titles(
    conn: &Connection,
    prefix: &str,
    limit: usize,
) -> Result<Vec<Suggestion>, StoreError> {
    let pattern = format!("{}%", escape_like_prefix(&normalize_lookup(prefix.trim())));
    let mut stmt = conn
        .prepare_cached(
            "SELECT g.title, g.slug FROM games g \
             WHERE g.title_normalized LIKE ? ESCAPE '!' \
             ORDER BY g.stars DESC, g.slug ASC LIMIT ?",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![pattern, limit as i64], |row| {
            Ok(Suggestion {
                title: row.get(0)?,
                slug: row.get(1)?,
            })
        })
        .map_err(sql_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err)?;
    Ok(rows)
}
