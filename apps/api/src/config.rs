use anyhow::{Context, Result};

use crate::llm_client::{Credential, ANTHROPIC_API_URL};

/// Application configuration loaded from environment variables.
///
/// `ANTHROPIC_API_KEY` is optional: without it, sessions must supply their own
/// credential before generation is enabled. `SESSION_IDLE_MINUTES` (default 60)
/// bounds how long an unused session, with its key and kit, stays in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<Credential>,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub session_idle_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY").map(Credential::new),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| ANTHROPIC_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            session_idle_minutes: optional_env("SESSION_IDLE_MINUTES")
                .unwrap_or_else(|| "60".to_string())
                .parse::<u32>()
                .ok()
                .filter(|m| *m > 0)
                .map(i64::from)
                .context("SESSION_IDLE_MINUTES must be a positive number of minutes")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests(api_key: Option<&str>) -> Self {
        Config {
            anthropic_api_key: api_key.map(|k| Credential::new(k.to_string())),
            anthropic_api_url: ANTHROPIC_API_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            session_idle_minutes: 60,
        }
    }
}
