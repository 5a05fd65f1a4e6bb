use super::auth::CurrentSession;
use super::{ApiError, AppState};
use crate::models::{Message, MessageQuery, NewMessage};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Message {} not found", id))
}

/// POST /api/messages
///
/// Public contact form. Every valid submission is stored, duplicates included.
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(new_message) = payload?;
    new_message.validate().map_err(ApiError::Validation)?;

    if let Some(program) = new_message.program {
        if !state.db.service_exists(program).await? {
            return Err(ApiError::Validation(format!(
                "program {} does not exist",
                program
            )));
        }
    }

    let message = state.db.create_message(&new_message).await?;
    info!("Stored contact message {} from {}", message.id, message.email);
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/messages?isRead=
pub async fn list_messages(
    _session: CurrentSession,
    State(state): State<AppState>,
    query: Result<Query<MessageQuery>, QueryRejection>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let Query(query) = query?;
    let messages = state
        .db
        .list_messages(query.is_read, state.message_list_limit)
        .await?;
    Ok(Json(messages))
}

/// GET /api/messages/:id
pub async fn get_message(
    _session: CurrentSession,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    state.db.get_message(id).await?.map(Json).ok_or_else(|| not_found(id))
}

/// PUT /api/messages/:id/read
pub async fn mark_read(
    session: CurrentSession,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    let message = state
        .db
        .mark_message_read(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!("Message {} marked read by '{}'", id, session.user.username);
    Ok(Json(message))
}

/// DELETE /api/messages/:id
pub async fn delete_message(
    session: CurrentSession,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.db.delete_message(id).await? {
        return Err(not_found(id));
    }

    info!("Message {} deleted by '{}'", id, session.user.username);
    Ok(StatusCode::NO_CONTENT)
}
