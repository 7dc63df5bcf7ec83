// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    InvalidSlug,
    MissingQueryParameter,
    QueryTooShort,
    NotFound,
    Unauthorized,
    StoreUnavailable,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidQueryParameter => "invalid_query_parameter",
            Self::InvalidSlug => "invalid_slug",
            Self::MissingQueryParameter => "missing_query_parameter",
            Self::QueryTooShort => "query_too_short",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::StoreUnavailable => "store_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
        )
    }

    #[must_use]
    pub fn invalid_slug(value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidSlug,
            "malformed slug",
            json!({"slug": value}),
        )
    }

    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::new(
            ApiErrorCode::MissingQueryParameter,
            format!("missing query parameter: {name}"),
            json!({"parameter": name}),
        )
    }

    #[must_use]
    pub fn query_too_short(min_len: usize) -> Self {
        Self::new(
            ApiErrorCode::QueryTooShort,
            format!("search query must be at least {min_len} characters"),
            json!({"min_length": min_len}),
        )
    }

    #[must_use]
    pub fn not_found(resource: &str, key: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("{resource} not found"),
            json!({"key": key}),
        )
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ApiErrorCode::Unauthorized, "unauthorized", json!({}))
    }

    #[must_use]
    pub fn store_unavailable(what: &str) -> Self {
        Self::new(
            ApiErrorCode::StoreUnavailable,
            format!("{what} requires a configured datastore"),
            json!({}),
        )
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorCode::Internal, "internal error", json!({}))
    }

    /// HTTP status for this error. Kept free of any HTTP framework types so
    /// the mapping is usable from every transport.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self.code {
            ApiErrorCode::InvalidQueryParameter
            | ApiErrorCode::InvalidSlug
            | ApiErrorCode::MissingQueryParameter
            | ApiErrorCode::QueryTooShort => 400,
            ApiErrorCode::NotFound => 404,
            ApiErrorCode::Unauthorized => 401,
            ApiErrorCode::StoreUnavailable | ApiErrorCode::Internal => 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
