//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::backend::{InterviewMessagePayload, InterviewStartPayload};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::interview::session::FallbackSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub participant_name: Option<String>,
    pub questionnaire_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewMessageRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub exchange_count: u32,
}

/// POST /api/interview
///
/// Starts an interview on the backend. Falls back to a locally generated
/// first-turn session when the backend cannot be reached.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    AppJson(request): AppJson<StartInterviewRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(participant_name), Some(questionnaire_id)) = (
        request.participant_name.filter(|s| !s.is_empty()),
        request.questionnaire_id.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "participant_name and questionnaire_id are required".to_string(),
        ));
    };

    info!("Starting interview for {participant_name} with questionnaire {questionnaire_id}");

    match state
        .backend
        .start_interview(&InterviewStartPayload {
            participant_name: &participant_name,
            questionnaire_id: &questionnaire_id,
        })
        .await
    {
        Ok(session) => return Ok(Json(session)),
        Err(e) => warn!("Interview backend unavailable, using fallback session: {e}"),
    }

    let session = FallbackSession::start(&participant_name, &questionnaire_id, chrono::Utc::now());
    let body = serde_json::to_value(session).map_err(anyhow::Error::from)?;
    Ok(Json(body))
}

/// POST /api/interview/message
///
/// Relays one participant turn to the backend. There is no fallback: the
/// backend owns the conversation state.
pub async fn handle_interview_message(
    State(state): State<AppState>,
    AppJson(request): AppJson<InterviewMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(session_id), Some(message)) = (
        request.session_id.filter(|s| !s.is_empty()),
        request.message.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::Validation(
            "session_id and message are required".to_string(),
        ));
    };

    let reply = state
        .backend
        .send_interview_message(&InterviewMessagePayload {
            session_id: &session_id,
            message: &message,
            exchange_count: request.exchange_count,
        })
        .await?;

    Ok(Json(reply))
}

/// POST /api/interview/:session_id/complete
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let result = state.backend.complete_interview(&session_id).await?;
    info!("Interview {session_id} marked complete");
    Ok(Json(result))
}

/// GET /api/interview
pub async fn handle_interview_status() -> Json<Value> {
    Json(json!({
        "status": "Interview API ready",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
