// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod error;
mod kpi;
mod models;
mod render;
mod routes;
mod search;

use config::Config;
use db::{CallLog, JsonLoadCatalog, JsonlCallLog, LoadCatalog};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loads: Arc<dyn LoadCatalog>,
    pub calls: Arc<dyn CallLog>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carrier_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let calls = JsonlCallLog::new(config.call_log_path.clone());
    tracing::info!(
        loads = %config.loads_path.display(),
        call_log = %calls.path().display(),
        "using file storage"
    );

    let state = AppState {
        loads: Arc::new(JsonLoadCatalog::new(config.loads_path.clone())),
        calls: Arc::new(calls),
        config: Arc::new(config),
    };

    let addr = state.config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "carrier api listening");

    axum::serve(listener, routes::router(state).into_make_service()).await?;
    Ok(())
}
