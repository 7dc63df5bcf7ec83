// SPDX-License-Identifier: Apache-2.0

use super::{
    api_error_response, encode_json, make_request_id, serve_cached_json, store_failure,
    with_request_id,
};
use crate::cache::{canonical_key, TtlTier};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use opengames_api::dto::{ListMeta, SearchData, SearchResponse};
use opengames_api::params::{
    parse_filters, parse_pagination, parse_search_query, suggest_limit, wants_suggestions,
};
use opengames_query::{
    fallback_catalog, search_games, search_games_fallback, search_in_memory, suggest_in_memory,
    suggest_titles,
};
use tracing::warn;

pub(crate) async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = make_request_id(&state);
    let query = match parse_search_query(&pairs) {
        Ok(query) => query,
        Err(err) => return with_request_id(api_error_response(err), &request_id),
    };

    if wants_suggestions(&pairs) {
        return suggest(state, headers, request_id, pairs, query).await;
    }

    let filters = parse_filters(&pairs);
    let pagination = parse_pagination(&pairs);
    let key = canonical_key("search:query", &pairs);

    let compute = async {
        let page = match &state.db {
            Some(db) => {
                let conn = db.lock().await;
                match search_games(&conn, &query, &filters, pagination) {
                    Ok(page) => page,
                    // The one recoverable failure: an unprovisioned search
                    // index degrades to the substring scan. Anything else
                    // must surface rather than masquerade as no results.
                    Err(err) if err.is_missing_index() => {
                        warn!("search index missing; serving substring fallback");
                        search_games_fallback(&conn, &query, &filters, pagination)
                            .map_err(|e| store_failure("fallback search", &e))?
                    }
                    Err(err) => return Err(store_failure("search", &err)),
                }
            }
            None => {
                let catalog = fallback_catalog().await;
                search_in_memory(&catalog, &query, &filters, pagination)
            }
        };
        let meta = ListMeta::new(page.total, pagination);
        encode_json(&SearchResponse {
            data: SearchData {
                query: query.clone(),
                results: page.items,
                filters: filters.clone(),
            },
            meta,
        })
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Short, compute).await
}

async fn suggest(
    state: AppState,
    headers: HeaderMap,
    request_id: String,
    pairs: Vec<(String, String)>,
    prefix: String,
) -> Response {
    let limit = suggest_limit(&pairs);
    let key = canonical_key("search:suggest", &pairs);
    let compute = async {
        let suggestions = match &state.db {
            Some(db) => {
                let conn = db.lock().await;
                suggest_titles(&conn, &prefix, limit)
                    .map_err(|e| store_failure("suggestions", &e))?
            }
            None => suggest_in_memory(&fallback_catalog().await, &prefix, limit),
        };
        encode_json(&suggestions)
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Short, compute).await
}
