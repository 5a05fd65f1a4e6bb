use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub database_url: String,

    // HTTP server
    pub port: u16,

    // Client fetchers
    pub api_base_url: String,

    // Admin message list
    pub message_list_limit: i64,

    // Login sessions older than this stop resolving
    pub session_ttl_hours: i64,

    // Seed script
    pub seed_admin_username: String,
    pub seed_admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/site.db?mode=rwc".to_string()),

            port: match std::env::var("PORT") {
                Ok(value) => value
                    .parse()
                    .context(format!("PORT must be a valid port number, got '{}'", value))?,
                Err(_) => 8080,
            },

            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),

            message_list_limit: std::env::var("MESSAGE_LIST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|limit: &i64| *limit > 0)
                .unwrap_or(500),

            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|hours: &i64| *hours > 0)
                .unwrap_or(168),

            seed_admin_username: std::env::var("SEED_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            seed_admin_password: std::env::var("SEED_ADMIN_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
        })
    }

    /// The seed admin password, required only by the seed script.
    pub fn require_seed_password(&self) -> Result<&str> {
        self.seed_admin_password
            .as_deref()
            .context("SEED_ADMIN_PASSWORD not set")
    }
}
