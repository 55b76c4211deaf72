//! Axum route handlers for sessions and their credentials.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::Credential;
use crate::session::{Session, SessionStatus};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

/// Looks up a session or fails with 404.
async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// Locks a session for the duration of one action and marks it active.
pub async fn lock_session(
    state: &AppState,
    id: Uuid,
) -> Result<OwnedMutexGuard<Session>, AppError> {
    let mut session = find_session(state, id).await?.lock_owned().await;
    session.touch();
    Ok(session)
}

/// POST /api/v1/sessions
///
/// The body is optional; without one the session starts with no key of its own.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionStatus>) {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let credential = req.api_key.map(|key| Credential::new(key.trim().to_string()));
    let handle = state.sessions.create(credential).await;
    let status = handle
        .lock()
        .await
        .status(state.config.anthropic_api_key.as_ref());

    info!(
        "Session {} created ({} active)",
        status.session_id,
        state.sessions.len().await
    );

    (StatusCode::CREATED, Json(status))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionStatus>, AppError> {
    let session = lock_session(&state, id).await?;
    Ok(Json(session.status(state.config.anthropic_api_key.as_ref())))
}

/// DELETE /api/v1/sessions/:id
///
/// Forgets the session together with its credential and kit.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!("Session {id} deleted ({} active)", state.sessions.len().await);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/credential
///
/// The key stays in memory for the life of the session and is never echoed back.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetCredentialRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    let credential = Credential::new(req.api_key.trim().to_string());
    if credential.is_blank() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    let mut session = lock_session(&state, id).await?;
    session.set_credential(credential);
    info!("Credential set for session {id}");

    Ok(Json(session.status(state.config.anthropic_api_key.as_ref())))
}
