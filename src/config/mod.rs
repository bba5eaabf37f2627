// src/config/mod.rs

use std::path::PathBuf;

use anyhow::bail;

const DEFAULT_LOADS_PATH: &str = "data/loads.json";
const DEFAULT_CALL_LOG_PATH: &str = "data/calls_history.jsonl";
const DEFAULT_PORT: u16 = 8080;

/// Process configuration, built once at startup and carried in `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub loads_path: PathBuf,
    pub call_log_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let Some(api_key) = var("API_KEY") else {
            bail!("API_KEY must be set (in the environment or .env)");
        };

        Ok(Self {
            api_key,
            loads_path: var("LOADS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOADS_PATH)),
            call_log_path: var("CALL_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CALL_LOG_PATH)),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
