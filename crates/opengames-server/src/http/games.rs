// SPDX-License-Identifier: Apache-2.0

use super::{
    api_error_response, encode_json, make_request_id, query_value, serve_cached_json, store_failure,
    with_request_id,
};
use crate::cache::{canonical_key, slug_key, TtlTier};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use opengames_api::dto::{GameData, GameResponse, GamesData, ListGamesResponse, ListMeta};
use opengames_api::params::{parse_filters, parse_pagination, parse_sort};
use opengames_api::ApiError;
use opengames_model::Slug;
use opengames_query::{
    fallback_catalog, get_game_by_slug, list_games, list_games_in_memory, related_games,
    related_in_memory, RELATED_LIMIT,
};

pub(crate) async fn list_games_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = make_request_id(&state);
    let pagination = parse_pagination(&pairs);
    let filters = parse_filters(&pairs);
    let sort = parse_sort(&pairs);
    let key = canonical_key("games:list", &pairs);

    let compute = async {
        let page = match &state.db {
            Some(db) => {
                let conn = db.lock().await;
                list_games(&conn, &filters, sort, pagination)
                    .map_err(|e| store_failure("list games", &e))?
            }
            None => {
                let catalog = fallback_catalog().await;
                list_games_in_memory(&catalog, &filters, sort, pagination)
            }
        };
        let meta = ListMeta::new(page.total, pagination);
        encode_json(&ListGamesResponse {
            data: GamesData {
                games: page.items,
                sort,
                filters: filters.clone(),
            },
            meta,
        })
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Short, compute).await
}

fn wants_related(pairs: &[(String, String)]) -> bool {
    query_value(pairs, "include")
        .map(|v| v.split(',').any(|part| part.trim() == "related"))
        .unwrap_or(false)
}

pub(crate) async fn game_by_slug_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug_raw): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = make_request_id(&state);
    let slug = match Slug::parse(&slug_raw) {
        Ok(slug) => slug,
        Err(_) => {
            return with_request_id(
                api_error_response(ApiError::invalid_slug(&slug_raw)),
                &request_id,
            );
        }
    };
    let include_related = wants_related(&pairs);
    let key = slug_key(slug.as_str(), include_related);

    let compute = async {
        let (game, related) = match &state.db {
            Some(db) => {
                let conn = db.lock().await;
                let game = get_game_by_slug(&conn, &slug)
                    .map_err(|e| store_failure("game lookup", &e))?
                    .ok_or_else(|| ApiError::not_found("game", slug.as_str()))?;
                let related = if include_related {
                    Some(
                        related_games(&conn, &game, RELATED_LIMIT)
                            .map_err(|e| store_failure("related games", &e))?,
                    )
                } else {
                    None
                };
                (game, related)
            }
            None => {
                let catalog = fallback_catalog().await;
                let game = catalog
                    .iter()
                    .find(|g| g.slug == slug)
                    .cloned()
                    .ok_or_else(|| ApiError::not_found("game", slug.as_str()))?;
                let related =
                    include_related.then(|| related_in_memory(&catalog, &game, RELATED_LIMIT));
                (game, related)
            }
        };
        encode_json(&GameResponse {
            data: GameData { game, related },
        })
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Medium, compute).await
}
