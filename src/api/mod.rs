//! REST API served to the public site and the admin area.
//!
//! Success bodies are the raw entity (or array of entities); failures use
//! `{ "error": "<message>" }` (see [`ApiError`]). Admin-only routes extract
//! [`auth::AdminSession`], routes for any signed-in account extract
//! [`auth::CurrentSession`].

pub mod announcements;
pub mod auth;
pub mod contact;
pub mod error;
pub mod messages;
pub mod services;
pub mod users;

pub use error::ApiError;

use crate::db::Database;
use chrono::{DateTime, Duration, Utc};
use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub message_list_limit: i64,
    pub session_ttl: Duration,
}

impl AppState {
    pub fn new(db: Database, message_list_limit: i64) -> Self {
        Self {
            db,
            message_list_limit,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Sessions created before this instant are expired.
    pub fn session_cutoff(&self) -> DateTime<Utc> {
        Utc::now() - self.session_ttl
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // Contact
        .route(
            "/api/contact",
            get(contact::get_contact).put(contact::update_contact),
        )
        // Messages
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/api/messages/:id",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/api/messages/:id/read", put(messages::mark_read))
        // Services
        .route(
            "/api/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/api/services/:slug",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        // Announcements
        .route(
            "/api/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route(
            "/api/announcements/:slug",
            get(announcements::get_announcement)
                .put(announcements::update_announcement)
                .delete(announcements::delete_announcement),
        )
        // Users
        .route("/api/users", get(users::list_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    if let Err(err) = state.db.ping().await {
        error!("DB health check failed: {:?}", err);
        return Json(json!({
            "status": "error",
            "db": "down",
        }));
    }

    Json(json!({ "status": "ok" }))
}
