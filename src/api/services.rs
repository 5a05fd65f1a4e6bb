use super::auth::AdminSession;
use super::error::slug_conflict;
use super::{ApiError, AppState};
use crate::models::{ServiceInput, ServiceItem, ServiceQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

fn not_found(slug: &str) -> ApiError {
    ApiError::NotFound(format!("Service '{}' not found", slug))
}

/// GET /api/services?limit=&isActive=
pub async fn list_services(
    State(state): State<AppState>,
    query: Result<Query<ServiceQuery>, QueryRejection>,
) -> Result<Json<Vec<ServiceItem>>, ApiError> {
    let Query(query) = query?;
    if matches!(query.limit, Some(limit) if limit < 0) {
        return Err(ApiError::Validation("limit must not be negative".to_string()));
    }

    let services = state.db.list_services(query.limit, query.is_active).await?;
    Ok(Json(services))
}

/// GET /api/services/:slug
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ServiceItem>, ApiError> {
    state
        .db
        .get_service(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&slug))
}

/// POST /api/services
pub async fn create_service(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceItem>), ApiError> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let service = state
        .db
        .create_service(&input)
        .await
        .map_err(|e| slug_conflict(e, &input.slug))?;
    info!("Service '{}' created by '{}'", service.slug, admin.username);
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/services/:slug
pub async fn update_service(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<ServiceItem>, ApiError> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let service = state
        .db
        .update_service(&slug, &input)
        .await
        .map_err(|e| slug_conflict(e, &input.slug))?
        .ok_or_else(|| not_found(&slug))?;

    info!("Service '{}' updated by '{}'", service.slug, admin.username);
    Ok(Json(service))
}

/// DELETE /api/services/:slug
pub async fn delete_service(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.db.delete_service(&slug).await? {
        return Err(not_found(&slug));
    }

    info!("Service '{}' deleted by '{}'", slug, admin.username);
    Ok(StatusCode::NO_CONTENT)
}
