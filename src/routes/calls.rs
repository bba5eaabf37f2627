// src/routes/calls.rs

use axum::{extract::{rejection::JsonRejection, State}, Json};

use super::blocking;
use crate::{
    auth::ApiKey,
    error::ApiError,
    models::{CallOutcome, StatusMessage},
    AppState,
};

/// POST /call-end
pub async fn call_end(
    _key: ApiKey,
    State(state): State<AppState>,
    body: Result<Json<CallOutcome>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    let Json(outcome) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    outcome.validate().map_err(ApiError::Validation)?;

    let outcome = blocking(move || {
        state.calls.append(&outcome)?;
        Ok(outcome)
    })
    .await?;
    tracing::info!(
        load_id = %outcome.load_id,
        mc_number = %outcome.mc_number,
        booked = outcome.booked,
        "call outcome recorded"
    );

    Ok(Json(StatusMessage {
        status: "success".into(),
        message: "Call data analyzed and stored".into(),
    }))
}
