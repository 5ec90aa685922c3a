//! Derived plan endpoints. Plans are regenerated on every request.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::error::Error;
use crate::plans::{generate_nutrition_plan, generate_workout_plan};
use crate::routes::{AppState, require_onboarded};

/// GET /api/plans/workout
pub async fn workout_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (_, profile) = require_onboarded(&state, &headers).await?;
    Ok(Json(generate_workout_plan(&profile)))
}

/// GET /api/plans/nutrition
pub async fn nutrition_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (_, profile) = require_onboarded(&state, &headers).await?;
    Ok(Json(generate_nutrition_plan(&profile)))
}
