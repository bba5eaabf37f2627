// src/auth/mod.rs
//
// Shared-key check. The key comes from the `X-API-KEY` header, or from the
// `api_key_query` query parameter so the dashboard opens straight in a browser.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Deserialize)]
struct KeyQuery {
    api_key_query: Option<String>,
}

/// Proof that the request carried the configured key.
#[derive(Debug, Clone)]
pub struct ApiKey;

fn presented_key(parts: &Parts) -> Option<String> {
    if let Some(v) = parts.headers.get(API_KEY_HEADER) {
        return v.to_str().ok().map(str::to_owned);
    }
    Query::<KeyQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.api_key_query)
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match presented_key(parts) {
            Some(key) if key == state.config.api_key => Ok(ApiKey),
            _ => {
                tracing::warn!(path = %parts.uri.path(), "rejected request with missing or bad api key");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
