use super::auth::AdminSession;
use super::error::slug_conflict;
use super::{ApiError, AppState};
use crate::models::{Announcement, AnnouncementInput, AnnouncementQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

fn not_found(slug: &str) -> ApiError {
    ApiError::NotFound(format!("Announcement '{}' not found", slug))
}

/// GET /api/announcements?limit=
pub async fn list_announcements(
    State(state): State<AppState>,
    query: Result<Query<AnnouncementQuery>, QueryRejection>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let Query(query) = query?;
    if matches!(query.limit, Some(limit) if limit < 0) {
        return Err(ApiError::Validation("limit must not be negative".to_string()));
    }
    Ok(Json(state.db.list_announcements(query.limit).await?))
}

/// GET /api/announcements/:slug
pub async fn get_announcement(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Announcement>, ApiError> {
    state
        .db
        .get_announcement(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&slug))
}

/// POST /api/announcements
pub async fn create_announcement(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<AnnouncementInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let announcement = state
        .db
        .create_announcement(&input)
        .await
        .map_err(|e| slug_conflict(e, &input.slug))?;
    info!(
        "Announcement '{}' published by '{}'",
        announcement.slug, admin.username
    );
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/announcements/:slug
pub async fn update_announcement(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<AnnouncementInput>, JsonRejection>,
) -> Result<Json<Announcement>, ApiError> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let announcement = state
        .db
        .update_announcement(&slug, &input)
        .await
        .map_err(|e| slug_conflict(e, &input.slug))?
        .ok_or_else(|| not_found(&slug))?;

    info!("Announcement '{}' updated by '{}'", slug, admin.username);
    Ok(Json(announcement))
}

/// DELETE /api/announcements/:slug
pub async fn delete_announcement(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.db.delete_announcement(&slug).await? {
        return Err(not_found(&slug));
    }

    info!("Announcement '{}' deleted by '{}'", slug, admin.username);
    Ok(StatusCode::NO_CONTENT)
}
