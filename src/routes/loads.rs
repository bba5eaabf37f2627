// src/routes/loads.rs

use axum::{extract::{rejection::QueryRejection, Query, State}, Json};
use serde::Deserialize;

use super::blocking;
use crate::{auth::ApiKey, error::ApiError, models::Load, search, AppState};

#[derive(Deserialize)]
pub struct SearchQ {
    pub origin: String,
    pub destination: String,
}

/// GET /search-load
pub async fn search_load(
    _key: ApiKey,
    State(state): State<AppState>,
    q: Result<Query<SearchQ>, QueryRejection>,
) -> Result<Json<Load>, ApiError> {
    let Query(q) = q.map_err(|e| ApiError::Validation(e.body_text()))?;

    // Both sources are read fresh so new bookings are visible immediately.
    let (catalog, log) = blocking(move || Ok((state.loads.read_all()?, state.calls.read_all()?))).await?;

    match search::find_open_load(catalog, &log, &q.origin, &q.destination) {
        Ok(load) => {
            tracing::info!(origin = %q.origin, destination = %q.destination, load_id = %load.load_id, "load matched");
            Ok(Json(load))
        }
        Err(e) => {
            tracing::info!(origin = %q.origin, destination = %q.destination, "no open load matched");
            Err(e)
        }
    }
}
