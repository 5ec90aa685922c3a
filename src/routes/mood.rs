//! Mood journal endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;

use crate::error::Error;
use crate::journal::stats::insights;
use crate::journal::{JournalSummary, MoodEntry};
use crate::routes::{AppState, require_onboarded};

#[derive(Debug, Deserialize)]
pub struct MoodEntryRequest {
    pub mood: u8,
    pub energy: u8,
    pub anxiety: u8,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickEntryRequest {
    pub mood: u8,
}

/// POST /api/mood
pub async fn add_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoodEntryRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let entry = MoodEntry::new(req.mood, req.energy, req.anxiety, req.note);
    state
        .db
        .append_mood_entry(user.id, &entry)
        .await
        .map_err(Error::Store)?;
    Ok(Json(entry))
}

/// POST /api/mood/quick
///
/// Mood only; energy and anxiety default to the scale midpoint.
pub async fn add_quick_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<QuickEntryRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let entry = MoodEntry::quick(req.mood);
    state
        .db
        .append_mood_entry(user.id, &entry)
        .await
        .map_err(Error::Store)?;
    Ok(Json(entry))
}

/// GET /api/mood
pub async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let entries = state
        .db
        .list_mood_entries(user.id)
        .await
        .map_err(Error::Store)?;
    Ok(Json(entries))
}

/// GET /api/mood/summary
pub async fn summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let entries = state
        .db
        .list_mood_entries(user.id)
        .await
        .map_err(Error::Store)?;
    let summary = JournalSummary::compute(&entries, Utc::now().date_naive());
    let insights = insights(&summary);
    Ok(Json(serde_json::json!({
        "summary": summary,
        "insights": insights,
    })))
}
