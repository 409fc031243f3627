//! Session HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/sessions/{id}          - Get a single session
//! - GET /api/v1/sessions/{id}/messages - Replay a session's history
//! - PUT /api/v1/sessions/{id}/locale   - Change a session's locale

use std::collections::BTreeMap;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use healthbuddy_types::chat::{ChatSession, Message};
use healthbuddy_types::error::ChatError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let session = state
        .controller
        .get_session(&sid)
        .await?
        .ok_or(AppError::Chat(ChatError::SessionNotFound))?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{sid}"))
        .with_link("messages", &format!("/api/v1/sessions/{sid}/messages"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/messages - Replay history in append order.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let messages = state.controller.history(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(messages, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{sid}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}

/// Request body for a locale change.
#[derive(Debug, Deserialize)]
pub struct SetLocaleRequest {
    pub locale: String,
}

/// Response body for a locale change: the locale actually applied
/// (which may differ from the requested one) plus every displayed
/// string re-resolved for it.
#[derive(Debug, Serialize)]
pub struct SetLocaleResponse {
    pub locale: String,
    pub strings: BTreeMap<String, String>,
}

/// PUT /api/v1/sessions/{id}/locale - Change a session's locale.
pub async fn set_locale(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SetLocaleRequest>,
) -> Result<Json<ApiResponse<SetLocaleResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let pinned = state.controller.set_locale(&sid, &request.locale).await?;
    let strings = state.controller.ui_strings(&pinned);

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        SetLocaleResponse {
            locale: pinned,
            strings,
        },
        request_id,
        elapsed,
    )
    .with_link("session", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}
