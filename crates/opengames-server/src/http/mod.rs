use crate::cache::TtlTier;
use crate::AppState;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use opengames_api::ApiError;
use opengames_model::sha256_hex;
use opengames_query::StoreError;
use serde_json::json;
use std::future::Future;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::error;

pub(crate) mod admin;
pub(crate) mod catalog;
pub(crate) mod games;
pub(crate) mod search;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(catalog::healthz_handler))
        .route("/api/games", get(games::list_games_handler))
        .route("/api/games/:slug", get(games::game_by_slug_handler))
        .route("/api/search", get(search::search_handler))
        .route("/api/categories", get(catalog::categories_handler))
        .route("/api/stats", get(catalog::stats_handler))
        .route("/api/admin/cache/purge", post(admin::purge_cache_handler))
        .route("/api/admin/search/reindex", post(admin::reindex_handler))
        .with_state(state)
}

pub(crate) fn make_request_id(state: &AppState) -> String {
    format!(
        "req-{:08x}",
        state.request_id_seed.fetch_add(1, Ordering::Relaxed)
    )
}

pub(crate) fn with_request_id(mut resp: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

/// Datastore failures surface to the wire as a generic 500; the full detail
/// is logged server-side only.
pub(crate) fn store_failure(context: &str, err: &StoreError) -> ApiError {
    error!("{context}: {err}");
    ApiError::internal()
}

pub(crate) fn query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

pub(crate) fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

fn json_body_response(
    request_headers: &HeaderMap,
    body: Vec<u8>,
    etag: &str,
    ttl: Duration,
) -> Response {
    if if_none_match(request_headers).as_deref() == Some(etag) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(resp.headers_mut(), ttl, etag);
        return resp;
    }
    let mut resp = Response::builder()
        .status(StatusCode::OK)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
    resp.headers_mut()
        .insert("content-type", HeaderValue::from_static("application/json"));
    put_cache_headers(resp.headers_mut(), ttl, etag);
    resp
}

/// Shared read-path flow: cache lookup, per-key coalescing of misses,
/// compute, cache fill, conditional-request handling.
pub(crate) async fn serve_cached_json<F>(
    state: &AppState,
    request_headers: &HeaderMap,
    request_id: &str,
    key: String,
    tier: TtlTier,
    compute: F,
) -> Response
where
    F: Future<Output = Result<Vec<u8>, ApiError>>,
{
    let ttl = tier.duration(&state.config);
    {
        let mut cache = state.response_cache.lock().await;
        if let Some(entry) = cache.get(&key) {
            let resp = json_body_response(request_headers, entry.body, &entry.etag, ttl);
            return with_request_id(resp, request_id);
        }
    }

    let _guard = state.coalescer.acquire(&key).await;
    {
        let mut cache = state.response_cache.lock().await;
        if let Some(entry) = cache.get(&key) {
            let resp = json_body_response(request_headers, entry.body, &entry.etag, ttl);
            return with_request_id(resp, request_id);
        }
    }

    match compute.await {
        Ok(body) => {
            let etag = format!("\"{}\"", sha256_hex(&body));
            state
                .response_cache
                .lock()
                .await
                .insert(key, body.clone(), etag.clone(), ttl);
            let resp = json_body_response(request_headers, body, &etag, ttl);
            with_request_id(resp, request_id)
        }
        Err(err) => with_request_id(api_error_response(err), request_id),
    }
}

pub(crate) fn encode_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| {
        error!("response encoding failed: {e}");
        ApiError::internal()
    })
}
