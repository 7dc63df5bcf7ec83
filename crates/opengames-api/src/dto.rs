use opengames_model::{Category, Game};
use opengames_query::{CatalogStats, GameFilter, Pagination, Sort, Suggestion};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub has_more: bool,
}

impl ListMeta {
    #[must_use]
    pub fn new(total: u64, pagination: Pagination) -> Self {
        Self {
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            has_more: pagination.has_more(total),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GamesData {
    pub games: Vec<Game>,
    pub sort: Sort,
    pub filters: GameFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListGamesResponse {
    pub data: GamesData,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameData {
    pub game: Game,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<Game>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResponse {
    pub data: GameData,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchData {
    pub query: String,
    pub results: Vec<Game>,
    pub filters: GameFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub data: SearchData,
    pub meta: ListMeta,
}

pub type SuggestResponse = Vec<Suggestion>;

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesData {
    pub categories: Vec<Category>,
    pub total: u64,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub data: CategoriesData,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub data: CatalogStats,
}
