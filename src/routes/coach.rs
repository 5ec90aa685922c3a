//! Coach chat endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;

use crate::error::Error;
use crate::journal::JournalSummary;
use crate::routes::{AppState, require_onboarded};

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// POST /api/coach/message
///
/// Appends the message and schedules the delayed coach reply. The
/// reply draws on the profile and the journal summary as they are
/// right now.
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MessageRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, profile) = require_onboarded(&state, &headers).await?;
    let entries = state
        .db
        .list_mood_entries(user.id)
        .await
        .map_err(Error::Store)?;
    let summary = JournalSummary::compute(&entries, Utc::now().date_naive());

    let message = state
        .chat
        .send(user.id, &user.display_name, &req.content, &profile, &summary)
        .await;
    Ok(Json(message))
}

/// GET /api/coach/history
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let messages = state.chat.history(user.id, &user.display_name).await;
    Ok(Json(messages))
}
