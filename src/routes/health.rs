// src/routes/health.rs
//
// Liveness plus a catalog read, so a missing or corrupt loads file shows up
// here instead of on the first carrier search.

use axum::{extract::State, Json};
use serde::Serialize;

use super::blocking;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_loads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let catalog = blocking(move || Ok(state.loads.read_all()?)).await;
    let (status, catalog_loads, catalog_error) = match catalog {
        Ok(loads) => ("ok", Some(loads.len()), None),
        Err(e) => {
            tracing::warn!(error = %e, "load catalog unreadable");
            ("degraded", None, Some(e.to_string()))
        }
    };
    Json(HealthResp {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_loads,
        catalog_error,
    })
}
