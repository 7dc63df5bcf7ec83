// SPDX-License-Identifier: Apache-2.0

use super::{api_error_response, make_request_id, store_failure, with_request_id};
use crate::config::ApiConfig;
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hmac::{Hmac, Mac};
use opengames_api::{ApiError, ApiErrorCode};
use opengames_query::create_search_index;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use tracing::info;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_MAC_KEY: &[u8] = b"opengames-admin-token-v1";

/// Constant-time equality via MAC comparison; never compares secrets
/// byte-by-byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(TOKEN_MAC_KEY) else {
        return false;
    };
    mac.update(a);
    let expected = mac.finalize().into_bytes();
    let Ok(mut mac) = HmacSha256::new_from_slice(TOKEN_MAC_KEY) else {
        return false;
    };
    mac.update(b);
    mac.verify_slice(&expected).is_ok()
}

/// Admin access requires a bearer token matching the configured secret.
/// An unset secret denies unconditionally; there is no open fallback in
/// any environment.
pub(crate) fn require_admin(headers: &HeaderMap, config: &ApiConfig) -> Result<(), ApiError> {
    let Some(expected) = config.admin_token.as_deref() else {
        return Err(ApiError::unauthorized());
    };
    let provided = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(ApiError::unauthorized)?;
    if constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
        Ok(())
    } else {
        Err(ApiError::unauthorized())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct PurgeRequest {
    pub(crate) key: Option<String>,
    pub(crate) prefix: Option<String>,
    #[serde(default)]
    pub(crate) all: bool,
}

pub(crate) async fn purge_cache_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<PurgeRequest>>,
) -> Response {
    let request_id = make_request_id(&state);
    if let Err(err) = require_admin(&headers, &state.config) {
        return with_request_id(api_error_response(err), &request_id);
    }
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let mut cache = state.response_cache.lock().await;
    let purged = if request.all {
        cache.clear()
    } else if let Some(key) = &request.key {
        cache.remove(key)
    } else if let Some(prefix) = &request.prefix {
        cache.remove_prefix(prefix)
    } else {
        drop(cache);
        let err = ApiError::new(
            ApiErrorCode::InvalidQueryParameter,
            "purge request must set key, prefix, or all",
            json!({}),
        );
        return with_request_id(api_error_response(err), &request_id);
    };
    info!("cache purge removed {purged} entries");
    with_request_id(Json(json!({"purged": purged})).into_response(), &request_id)
}

pub(crate) async fn reindex_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = make_request_id(&state);
    if let Err(err) = require_admin(&headers, &state.config) {
        return with_request_id(api_error_response(err), &request_id);
    }
    // Admin mutation fails loudly without a store; only public reads
    // degrade to the fallback catalog.
    let Some(db) = &state.db else {
        return with_request_id(
            api_error_response(ApiError::store_unavailable("search reindex")),
            &request_id,
        );
    };

    let indexed = {
        let conn = db.lock().await;
        match create_search_index(&conn) {
            Ok(indexed) => indexed,
            Err(err) => {
                return with_request_id(
                    api_error_response(store_failure("search reindex", &err)),
                    &request_id,
                );
            }
        }
    };
    let invalidated = state.response_cache.lock().await.remove_prefix("search:");
    info!("search reindex covered {indexed} games, invalidated {invalidated} cached responses");
    with_request_id(
        Json(json!({"indexed": indexed, "invalidated": invalidated})).into_response(),
        &request_id,
    )
}
