use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BATCH_WORKERS: usize = 500;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset ones fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON taxonomy document. The bundled catalog is used when unset.
    pub taxonomy_path: Option<PathBuf>,
    /// Upper bound on workers per `POST /api/v1/batch` request.
    pub max_batch_workers: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let max_batch_workers = match lookup("MAX_BATCH_WORKERS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("MAX_BATCH_WORKERS must be a positive integer, got '{raw}'"))?,
            None => DEFAULT_MAX_BATCH_WORKERS,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            taxonomy_path: lookup("TAXONOMY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_batch_workers,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            taxonomy_path: None,
            max_batch_workers: DEFAULT_MAX_BATCH_WORKERS,
        }
    }
}
