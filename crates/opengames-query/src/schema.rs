// SPDX-License-Identifier: Apache-2.0

use crate::filters::normalize_lookup;
use crate::store_error::StoreError;
use opengames_model::Game;
use rusqlite::{params, Connection};

pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS games (
  id INTEGER PRIMARY KEY,
  slug TEXT NOT NULL UNIQUE,
  title TEXT NOT NULL,
  title_normalized TEXT NOT NULL,
  description TEXT,
  homepage TEXT,
  repository_url TEXT NOT NULL,
  language TEXT,
  genre TEXT,
  stars INTEGER NOT NULL DEFAULT 0 CHECK (stars >= 0),
  forks INTEGER NOT NULL DEFAULT 0 CHECK (forks >= 0),
  downloads INTEGER NOT NULL DEFAULT 0 CHECK (downloads >= 0),
  created_at INTEGER,
  last_commit INTEGER,
  updated_at INTEGER,
  is_archived INTEGER NOT NULL DEFAULT 0,
  is_multiplayer INTEGER NOT NULL DEFAULT 0,
  latest_release TEXT,
  thumbnail TEXT,
  screenshots TEXT NOT NULL DEFAULT '[]',
  device_picks TEXT NOT NULL DEFAULT '[]'
);
CREATE TABLE IF NOT EXISTS game_topics (
  game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
  topic TEXT NOT NULL,
  PRIMARY KEY (game_id, topic)
);
CREATE TABLE IF NOT EXISTS game_platforms (
  game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
  platform TEXT NOT NULL,
  PRIMARY KEY (game_id, platform)
);
CREATE INDEX IF NOT EXISTS idx_games_stars ON games(stars);
CREATE INDEX IF NOT EXISTS idx_games_language ON games(language);
CREATE INDEX IF NOT EXISTS idx_games_genre ON games(genre);
CREATE INDEX IF NOT EXISTS idx_games_last_commit ON games(last_commit);
CREATE INDEX IF NOT EXISTS idx_games_title_normalized ON games(title_normalized);
CREATE INDEX IF NOT EXISTS idx_game_topics_topic ON game_topics(topic);
CREATE INDEX IF NOT EXISTS idx_game_platforms_platform ON game_platforms(platform);
";

pub const SEARCH_INDEX_TABLE: &str = "games_fts";

pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// True when the FTS table exists. This structural probe is the only
/// missing-index detection in the crate; callers never inspect SQLite
/// error text.
pub fn search_index_present(conn: &Connection) -> Result<bool, StoreError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        params![SEARCH_INDEX_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// (Re)builds the full-text index from the relational rows.
pub fn create_search_index(conn: &Connection) -> Result<u64, StoreError> {
    conn.execute_batch(
        "
DROP TABLE IF EXISTS games_fts;
CREATE VIRTUAL TABLE games_fts USING fts5(title, description, topics, content='');
",
    )?;
    let indexed = conn.execute(
        "INSERT INTO games_fts(rowid, title, description, topics)
         SELECT g.id,
                g.title,
                COALESCE(g.description, ''),
                COALESCE((SELECT group_concat(topic, ' ') FROM game_topics t
                          WHERE t.game_id = g.id), '')
         FROM games g",
        [],
    )?;
    Ok(indexed as u64)
}

pub fn insert_game(conn: &Connection, game: &Game) -> Result<(), StoreError> {
    let screenshots = serde_json::to_string(&game.screenshots)
        .map_err(|e| StoreError::sql(format!("encode screenshots: {e}")))?;
    let device_picks = serde_json::to_string(&game.device_picks)
        .map_err(|e| StoreError::sql(format!("encode device picks: {e}")))?;
    conn.execute(
        "INSERT INTO games (
            id, slug, title, title_normalized, description, homepage,
            repository_url, language, genre, stars, forks, downloads,
            created_at, last_commit, updated_at, is_archived, is_multiplayer,
            latest_release, thumbnail, screenshots, device_picks
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                   ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)",
        params![
            game.id,
            game.slug.as_str(),
            game.title,
            normalize_lookup(&game.title),
            game.description,
            game.homepage,
            game.repository_url,
            game.language,
            game.genre,
            game.stars as i64,
            game.forks as i64,
            game.downloads as i64,
            game.created_at.map(|t| t.timestamp()),
            game.last_commit.map(|t| t.timestamp()),
            game.updated_at.map(|t| t.timestamp()),
            game.is_archived,
            game.is_multiplayer,
            game.latest_release,
            game.thumbnail,
            screenshots,
            device_picks,
        ],
    )?;
    for topic in &game.topics {
        conn.execute(
            "INSERT OR IGNORE INTO game_topics (game_id, topic) VALUES (?1, ?2)",
            params![game.id, topic],
        )?;
    }
    for platform in &game.platforms {
        conn.execute(
            "INSERT OR IGNORE INTO game_platforms (game_id, platform) VALUES (?1, ?2)",
            params![game.id, platform],
        )?;
    }
    Ok(())
}

/// Loads a full catalog into an initialized schema.
pub fn load_catalog(conn: &Connection, games: &[Game]) -> Result<(), StoreError> {
    for game in games {
        insert_game(conn, game)?;
    }
    Ok(())
}
