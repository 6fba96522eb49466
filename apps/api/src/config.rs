use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Application configuration loaded from environment variables.
///
/// Only malformed values fail startup. A missing `GROQ_API_KEY` is tolerated:
/// the model-backed actions report a configuration error, the dashboards keep working.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub model_url: String,
    pub model: String,
    pub model_timeout: Duration,
    pub results_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            model_url: optional_env("GROQ_API_URL").unwrap_or_else(|| DEFAULT_MODEL_URL.to_string()),
            model: optional_env("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_timeout: Duration::from_secs(
                std::env::var("MODEL_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            results_path: optional_env("RESULTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("results.csv")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
