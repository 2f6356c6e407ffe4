//! Axum route handlers for the Assistant API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::assistant::formatter::welcome;
use crate::assistant::intent::Intent;
use crate::assistant::session::SessionView;
use crate::assistant::speech::sanitize_for_speech;
use crate::backend::snapshot::load_snapshot;
use crate::errors::AppError;
use crate::models::knowledge::KnowledgeSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub message: String,
    /// Answer from this snapshot instead of loading one from the backend.
    pub snapshot: Option<KnowledgeSnapshot>,
    pub speaker_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub reply: String,
    /// `reply` with decoration stripped, for text-to-speech.
    pub speech: String,
    /// Intent matched by the local rules; absent when the remote AI answered.
    pub intent: Option<Intent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenSessionRequest {
    pub speaker_name: Option<String>,
    pub snapshot: Option<KnowledgeSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: String,
    pub speech: String,
    pub intent: Option<Intent>,
    /// False when the session was closed before the reply was ready.
    pub delivered: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assistant/respond
///
/// Stateless question/answer. Blank messages get the help menu.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Json<RespondResponse> {
    let snapshot = match request.snapshot {
        Some(snapshot) => snapshot,
        None => load_snapshot(&state.backend).await,
    };

    let reply = state
        .responder
        .reply(&request.message, &snapshot, request.speaker_name.as_deref())
        .await;

    Json(RespondResponse {
        speech: sanitize_for_speech(&reply.text),
        reply: reply.text,
        intent: reply.intent,
    })
}

/// POST /api/v1/assistant/sessions
///
/// Opens a conversation. The snapshot is loaded once here unless the caller supplies one.
/// An empty body opens an anonymous session; any other body must be a valid JSON request.
pub async fn handle_open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let request = parse_open_request(&headers, &body)?;
    let snapshot = match request.snapshot {
        Some(snapshot) => snapshot,
        None => load_snapshot(&state.backend).await,
    };

    let greeting = welcome(&state.config.assistant_name, &snapshot);
    let session = state
        .sessions
        .open(snapshot, request.speaker_name, greeting)
        .await;

    Ok((StatusCode::CREATED, Json(session)))
}

fn parse_open_request(headers: &HeaderMap, body: &[u8]) -> Result<OpenSessionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(OpenSessionRequest::default());
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"));
    if !is_json {
        return Err(AppError::Validation(
            "Expected a JSON body with Content-Type: application/json".to_string(),
        ));
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid session request: {e}")))
}

/// GET /api/v1/assistant/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// POST /api/v1/assistant/sessions/:id/messages
///
/// Appends the message, answers it, and appends the answer. A second message
/// while one is being answered is refused with 409.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let turn = state.sessions.begin_turn(id, &request.message).await?;

    // Detached from the request so a dropped connection still clears `pending`.
    let worker = state.clone();
    let (reply, delivered) = tokio::spawn(async move {
        let reply = worker
            .responder
            .reply(&turn.message, &turn.snapshot, turn.speaker_name.as_deref())
            .await;
        let delivered = worker.sessions.complete_turn(id, &reply.text).await;
        (reply, delivered)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Reply task failed: {e}")))?;

    if !delivered {
        debug!(session_id = %id, "Reply produced for a closed session");
    }

    Ok(Json(SendMessageResponse {
        speech: sanitize_for_speech(&reply.text),
        reply: reply.text,
        intent: reply.intent,
        delivered,
    }))
}

/// POST /api/v1/assistant/sessions/:id/refresh
///
/// Reloads the session's snapshot from the backend between turns.
pub async fn handle_refresh_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    // Fail fast on unknown ids before hitting the backend.
    state.sessions.get(id).await?;
    let snapshot = load_snapshot(&state.backend).await;
    state.sessions.refresh_snapshot(id, snapshot).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/assistant/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
