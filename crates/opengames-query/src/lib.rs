#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "opengames-query";

mod db;
mod executor;
mod fallback;
mod filters;
mod memory;
mod schema;
mod search;
mod store_error;

pub use executor::{
    catalog_stats, get_game_by_slug, list_games, related_games, CatalogStats, DimensionCount,
    RELATED_LIMIT,
};
pub use fallback::{fallback_catalog, seed_catalog};
pub use filters::{
    escape_like_prefix, normalize_lookup, GameFilter, GamePage, Pagination, Sort, SortField,
    SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use memory::{
    list_games_in_memory, related_in_memory, search_in_memory, stats_in_memory, suggest_in_memory,
};
pub use schema::{create_search_index, init_schema, insert_game, load_catalog, search_index_present};
pub use search::{search_games, search_games_fallback, suggest_titles, Suggestion};
pub use store_error::{StoreError, StoreErrorKind};

#[cfg(test)]
mod query_tests;
