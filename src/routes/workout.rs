//! Workout session endpoints.
//!
//! The session itself ticks in the background driver; these handlers
//! only change phase and report state.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::{Error, SessionError};
use crate::plans::generate_workout_plan;
use crate::routes::{AppState, require_onboarded};
use crate::workout::WorkoutSession;

fn session_json(session: &WorkoutSession, finished: bool) -> serde_json::Value {
    json!({
        "session": session,
        "progress": session.progress(),
        "finished": finished,
    })
}

/// POST /api/workout/session
///
/// Creates the session from the generated plan if none is active, then
/// starts the countdown.
pub async fn start(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, profile) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .entry(user.id)
        .or_insert_with(|| WorkoutSession::new(generate_workout_plan(&profile)));
    session.start();
    Ok(Json(session_json(session, false)))
}

/// GET /api/workout/session
pub async fn current(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let workouts = state.workouts.lock().await;
    let session = workouts
        .get(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;
    Ok(Json(session_json(session, false)))
}

/// POST /api/workout/session/pause
pub async fn pause(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .get_mut(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;
    session.pause();
    Ok(Json(session_json(session, false)))
}

/// POST /api/workout/session/resume
pub async fn resume(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .get_mut(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;
    session.resume();
    Ok(Json(session_json(session, false)))
}

/// POST /api/workout/session/reset
///
/// Reseeds the current exercise's duration; completed exercises stay
/// completed.
pub async fn reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .get_mut(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;
    session.reset();
    Ok(Json(session_json(session, false)))
}

/// POST /api/workout/session/complete
///
/// Marks the current exercise done. Completing the last one ends the
/// session and removes it.
pub async fn complete(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .get_mut(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;

    if session.complete_exercise() {
        let finished = session.clone();
        workouts.remove(&user.id);
        info!(user_id = %user.id, "Workout session finished");
        Ok(Json(session_json(&finished, true)))
    } else {
        Ok(Json(session_json(session, false)))
    }
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

/// POST /api/workout/session/jump
pub async fn jump(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<JumpRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, _) = require_onboarded(&state, &headers).await?;
    let mut workouts = state.workouts.lock().await;
    let session = workouts
        .get_mut(&user.id)
        .ok_or(Error::Session(SessionError::NoActiveWorkout))?;
    session.jump_to(req.index);
    Ok(Json(session_json(session, false)))
}
