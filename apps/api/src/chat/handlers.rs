//! Axum route handlers for the Chat API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::backend::ChatPayload;
use crate::chat::fallback::mock_chat_response;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub profile_id: Option<String>,
    pub message: Option<String>,
}

/// POST /api/chat
///
/// Relays a message to the digital twin. When the chat backend cannot answer,
/// a canned reply is returned with `source: "mock_fallback"`.
pub async fn handle_chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(profile_id), Some(message)) = (
        request.profile_id.filter(|s| !s.is_empty()),
        request.message.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "profile_id and message are required".to_string(),
        ));
    };

    info!("Chat request for profile {profile_id}");

    match state
        .backend
        .chat(&ChatPayload {
            profile_id: &profile_id,
            message: &message,
        })
        .await
    {
        Ok(reply) => return Ok(Json(reply)),
        Err(e) => warn!("Chat backend unavailable, using fallback reply: {e}"),
    }

    Ok(Json(json!({
        "response": mock_chat_response(&message),
        "source": "mock_fallback"
    })))
}

/// GET /api/chat
pub async fn handle_chat_status() -> Json<Value> {
    Json(json!({
        "status": "Chat API ready",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
