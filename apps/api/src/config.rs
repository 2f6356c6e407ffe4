use anyhow::{Context, Result};

const DEFAULT_ASSISTANT_NAME: &str = "Neurova AI";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portfolio backend, e.g. `https://portfolio-backend.example.com`.
    pub portfolio_api_url: String,
    /// Ask the backend's `/api/ai-query` before answering from local rules.
    pub ai_delegation_enabled: bool,
    /// Upper bound on any single backend request, including AI delegation.
    pub backend_timeout_secs: u64,
    /// Name the assistant introduces itself with.
    pub assistant_name: String,
    /// Sessions with no activity for this long are dropped.
    pub session_idle_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            portfolio_api_url: require_env("PORTFOLIO_API_URL")?,
            ai_delegation_enabled: std::env::var("AI_DELEGATION_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            backend_timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            assistant_name: std::env::var("ASSISTANT_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
            session_idle_secs: std::env::var("SESSION_IDLE_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
