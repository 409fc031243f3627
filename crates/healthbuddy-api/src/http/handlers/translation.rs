//! Translation HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/translations/{locale} - Resolved strings for a locale

use std::collections::BTreeMap;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Response body: every string the chat UI displays, resolved through
/// the fallback chain for the requested locale.
#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    /// The locale the strings were resolved for (pinned to a servable one).
    pub locale: String,
    /// Locale codes the catalog can serve directly.
    pub available: Vec<String>,
    pub strings: BTreeMap<String, String>,
}

/// GET /api/v1/translations/{locale} - Resolved strings for a locale.
pub async fn get_translations(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<ApiResponse<TranslationsResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let catalog = state.controller.catalog();
    let pinned = catalog.pin_locale(&locale).to_string();
    let strings = state.controller.ui_strings(&pinned);
    let available = catalog.locales().into_iter().map(String::from).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        TranslationsResponse {
            locale: pinned.clone(),
            available,
            strings,
        },
        request_id,
        elapsed,
    )
    .with_link("self", &format!("/api/v1/translations/{pinned}"));

    Ok(Json(resp))
}
