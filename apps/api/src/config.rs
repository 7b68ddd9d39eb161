use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::DEFAULT_TARGET_FIELD;

/// Application configuration loaded from environment variables.
/// Nothing is required: without `DATABASE_URL` the analyzer runs on the static catalog.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub db_connect_timeout: Duration,
    pub db_connect_retries: u32,
    pub db_max_connections: u32,
    pub default_target_field: String,
    pub patterns_file: Option<PathBuf>,
    /// Seeds the score jitter for reproducible runs; unset means thread RNG.
    pub score_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_connect_timeout: Duration::from_secs(parse_env("DB_CONNECT_TIMEOUT_SECS", 5)?),
            db_connect_retries: parse_env("DB_CONNECT_RETRIES", 2)?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 5)?,
            default_target_field: optional_env("DEFAULT_TARGET_FIELD")
                .unwrap_or_else(|| DEFAULT_TARGET_FIELD.to_string()),
            patterns_file: optional_env("PATTERNS_FILE").map(PathBuf::from),
            score_seed: optional_env("SCORE_SEED")
                .map(|raw| {
                    raw.parse::<u64>()
                        .with_context(|| format!("SCORE_SEED must be an unsigned integer, got '{raw}'"))
                })
                .transpose()?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
