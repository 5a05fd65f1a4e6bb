use super::auth::AdminSession;
use super::{ApiError, AppState};
use crate::models::User;
use axum::extract::State;
use axum::Json;

/// GET /api/users
pub async fn list_users(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.db.list_users().await?))
}
