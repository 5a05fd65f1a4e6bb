//! Bearer-token sessions.
//!
//! `POST /api/auth/login` hands out an opaque token; the server keeps only
//! its SHA-256 digest. Handlers opt into authentication by extracting
//! [`CurrentSession`] (any active account) or [`AdminSession`] (`isAdmin`).

use super::{ApiError, AppState};
use crate::models::{LoginRequest, LoginResponse, User};
use crate::security::{generate_token, hash_token, verify_password};
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::{debug, info, warn};

/// The signed-in account behind a request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user: User,
    pub token_hash: String,
}

/// A signed-in account with admin privileges.
#[derive(Debug, Clone)]
pub struct AdminSession(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let token_hash = hash_token(token);

        let user = state
            .db
            .find_session_user(&token_hash, state.session_cutoff())
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentSession { user, token_hash })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let session = CurrentSession::from_request_parts(parts, state).await?;
        if !session.user.is_admin {
            warn!(
                "User '{}' attempted an admin action on {}",
                session.user.username, parts.uri
            );
            return Err(ApiError::Forbidden);
        }
        Ok(AdminSession(session.user))
    }
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;

    let user = state.db.get_user_by_username(request.username.trim()).await?;
    let user = match user {
        Some(user) if user.is_active && verify_password(&request.password, &user.password_hash) => {
            user
        }
        _ => {
            warn!("Failed login attempt for '{}'", request.username);
            return Err(ApiError::Unauthorized);
        }
    };

    let pruned = state.db.prune_sessions(state.session_cutoff()).await?;
    if pruned > 0 {
        debug!("Pruned {} expired sessions", pruned);
    }

    let token = generate_token();
    state.db.create_session(&hash_token(&token), user.id).await?;
    info!("User '{}' signed in", user.username);

    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/auth/logout
pub async fn logout(
    session: CurrentSession,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_session(&session.token_hash).await?;
    info!("User '{}' signed out", session.user.username);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(session: CurrentSession) -> Json<User> {
    Json(session.user)
}
