use super::auth::AdminSession;
use super::{ApiError, AppState};
use crate::models::ContactInfo;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

/// GET /api/contact
pub async fn get_contact(State(state): State<AppState>) -> Result<Json<ContactInfo>, ApiError> {
    state
        .db
        .get_contact()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Contact info not found".to_string()))
}

/// PUT /api/contact (create-or-update)
pub async fn update_contact(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<ContactInfo>, JsonRejection>,
) -> Result<Json<ContactInfo>, ApiError> {
    let Json(contact) = payload?;
    contact.validate().map_err(ApiError::Validation)?;

    let saved = state.db.upsert_contact(&contact).await?;
    info!("Contact info updated by '{}'", admin.username);
    Ok(Json(saved))
}
