use anyhow::{Context, Result};
use aviation_site::api::{self, AppState};
use aviation_site::config::Config;
use aviation_site::db::Database;
use aviation_site::i18n::TranslationValidator;
use std::net::SocketAddr;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aviation_site=info".parse()?),
        )
        .init();

    info!("Starting aviation site API");

    let config = Config::from_env()?;

    // Missing translations fall back to their keys, so only warn
    let report = TranslationValidator::validate_tables();
    for error in &report.errors {
        warn!("Translation table: {}", error);
    }

    let db = Database::connect(&config.database_url).await?;
    info!("Connected to database");

    let state = AppState::new(db, config.message_list_limit)
        .with_session_ttl(chrono::Duration::hours(config.session_ttl_hours));
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
