use super::{encode_json, make_request_id, query_value, serve_cached_json, store_failure, with_request_id};
use crate::cache::{canonical_key, TtlTier};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use opengames_api::dto::{CategoriesData, CategoriesResponse, StatsResponse};
use opengames_model::{builtin_categories, CategoryKind};
use opengames_query::{catalog_stats, fallback_catalog, search_index_present, stats_in_memory};
use serde_json::json;

pub(crate) async fn categories_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = make_request_id(&state);
    let kind = query_value(&pairs, "type").and_then(CategoryKind::parse);
    let source = query_value(&pairs, "source").unwrap_or("builtin").to_string();
    let key = canonical_key("categories:list", &pairs);

    let compute = async {
        let categories: Vec<_> = builtin_categories()
            .iter()
            .filter(|c| kind.map_or(true, |k| c.kind == k))
            .cloned()
            .collect();
        let total = categories.len() as u64;
        encode_json(&CategoriesResponse {
            data: CategoriesData {
                categories,
                total,
                source,
            },
        })
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Long, compute).await
}

pub(crate) async fn stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = make_request_id(&state);
    let key = canonical_key("stats:all", &pairs);

    let compute = async {
        let stats = match &state.db {
            Some(db) => {
                let conn = db.lock().await;
                catalog_stats(&conn, Utc::now()).map_err(|e| store_failure("stats", &e))?
            }
            None => stats_in_memory(&fallback_catalog().await, Utc::now()),
        };
        encode_json(&StatsResponse { data: stats })
    };
    serve_cached_json(&state, &headers, &request_id, key, TtlTier::Medium, compute).await
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let (store, search_index) = match &state.db {
        Some(db) => {
            let conn = db.lock().await;
            let index = search_index_present(&conn).unwrap_or(false);
            ("sqlite", Some(index))
        }
        None => ("fallback", None),
    };
    let resp = Json(json!({
        "status": "ok",
        "store": store,
        "search_index": search_index,
    }))
    .into_response();
    with_request_id(resp, &request_id)
}
