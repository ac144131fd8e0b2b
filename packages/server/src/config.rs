use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::reconciliation::ReconciliationConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the server runs on the
    /// in-memory store (development only, data is lost on restart).
    pub database_url: Option<String>,
    pub port: u16,
    pub reconciliation: ReconciliationConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = ReconciliationConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            reconciliation: ReconciliationConfig {
                enabled: parse_var("RECONCILE_ENABLED", defaults.enabled)?,
                word_overlap_weight: parse_var("RECONCILE_WORD_WEIGHT", defaults.word_overlap_weight)?,
                acceptance_threshold: parse_var("RECONCILE_THRESHOLD", defaults.acceptance_threshold)?,
                ..defaults
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid value")),
        Err(_) => Ok(default),
    }
}
