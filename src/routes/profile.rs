//! Profile read and wholesale replace.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::error::Error;
use crate::onboarding::UserProfile;
use crate::routes::{AppState, require_onboarded};

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, profile) = require_onboarded(&state, &headers).await?;
    Ok(Json(serde_json::json!({
        "user": user.view(),
        "profile": profile,
    })))
}

/// PUT /api/profile
///
/// Replaces the profile wholesale; there is no partial update.
pub async fn put_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(profile): Json<UserProfile>,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    state
        .db
        .put_profile(user.id, &profile)
        .await
        .map_err(Error::Store)?;
    Ok(Json(profile))
}
