// src/routes/dashboard.rs

use axum::{extract::{Query, State}, response::Html, Json};
use serde::Deserialize;

use super::blocking;
use crate::{
    auth::ApiKey,
    error::ApiError,
    kpi::{self, DashboardFilter, DashboardKpis},
    models::CallOutcome,
    render, AppState,
};

#[derive(Deserialize)]
pub struct DashboardQ {
    pub status: Option<String>,
    pub search_id: Option<String>,
    pub api_key_query: Option<String>,
}

impl DashboardQ {
    fn filter(&self) -> DashboardFilter {
        DashboardFilter {
            status: self.status.clone(),
            search_id: self.search_id.clone(),
        }
    }
}

async fn filtered_log(state: AppState, filter: &DashboardFilter) -> Result<Vec<CallOutcome>, ApiError> {
    let log = blocking(move || Ok(state.calls.read_all()?)).await?;
    Ok(filter.apply(log))
}

/// GET /dashboard
pub async fn dashboard(
    _key: ApiKey,
    State(state): State<AppState>,
    Query(q): Query<DashboardQ>,
) -> Result<Html<String>, ApiError> {
    let filter = q.filter();
    let rows = filtered_log(state, &filter).await?;
    let kpis = kpi::compute(&rows);
    tracing::info!(rows = rows.len(), booking_rate = kpis.booking_rate, "dashboard rendered");
    Ok(Html(render::render_dashboard(&kpis, &rows, &filter, q.api_key_query.as_deref())))
}

/// GET /dashboard/kpi
pub async fn dashboard_kpi(
    _key: ApiKey,
    State(state): State<AppState>,
    Query(q): Query<DashboardQ>,
) -> Result<Json<DashboardKpis>, ApiError> {
    let rows = filtered_log(state, &q.filter()).await?;
    Ok(Json(kpi::compute(&rows)))
}
