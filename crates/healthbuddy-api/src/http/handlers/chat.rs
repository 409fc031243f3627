//! Chat submission HTTP handler.
//!
//! Endpoint:
//! - POST /api/v1/chat - Submit an utterance; starts a session if none given

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use healthbuddy_types::chat::Exchange;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a chat submission.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Existing session to continue. Omit to start a new one.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// The visitor's utterance.
    pub message: String,
    /// Locale for a new session; ignored when `session_id` is given.
    #[serde(default)]
    pub locale: Option<String>,
}

/// Response body for a chat submission.
///
/// `exchange` is null for whitespace-only input, which creates no
/// messages.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub exchange: Option<Exchange>,
}

/// POST /api/v1/chat - Submit an utterance and get the bot reply.
pub async fn submit_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = match request.session_id {
        Some(id) => id,
        None => {
            let locale = request
                .locale
                .as_deref()
                .unwrap_or(&state.config.default_locale);
            state.controller.start_session(locale).await?.id
        }
    };

    let exchange = state.controller.submit(&session_id, &request.message).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        ChatResponse {
            session_id,
            exchange,
        },
        request_id,
        elapsed,
    )
    .with_link("session", &format!("/api/v1/sessions/{session_id}"))
    .with_link(
        "messages",
        &format!("/api/v1/sessions/{session_id}/messages"),
    );

    Ok(Json(resp))
}
