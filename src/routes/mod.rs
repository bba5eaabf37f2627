use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::ApiError, AppState};

pub mod health;
pub mod loads;
pub mod calls;
pub mod dashboard;

// Storage is plain file I/O; keep it off the async workers.
pub async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("storage task failed: {e}")))?
}

pub fn router(state: AppState) -> Router {
    // Permissive CORS so the dashboard can be opened from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // health
        .route("/health", get(health::health))
        // carrier-facing
        .route("/search-load", get(loads::search_load))
        .route("/call-end", post(calls::call_end))
        // reporting
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/kpi", get(dashboard::dashboard_kpi))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
