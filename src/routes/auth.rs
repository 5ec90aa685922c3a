//! Signup, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;

use crate::error::Error;
use crate::routes::{AppState, authenticate};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// POST /api/auth/signup
///
/// Creates the account and logs it in; the response carries the
/// session token alongside the user view.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = state
        .accounts
        .signup(&req.name, &req.email, &req.password)
        .await?;
    let token = state.sessions.issue(user.id).await;
    Ok(Json(serde_json::json!({"token": token, "user": user})))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = state
        .accounts
        .check_credential(&req.email, &req.password)
        .await?;
    let token = state.sessions.issue(user.id).await;
    info!(user_id = %user.id, "Login");
    Ok(Json(serde_json::json!({"token": token, "user": user})))
}

/// POST /api/auth/logout
///
/// Revokes the token and drops every piece of in-memory state tied to
/// the user: chat transcript (with pending replies), wizard draft, and
/// workout session. Only store-backed records survive a logout.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let user = authenticate(&state, &headers).await?;
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.sessions.revoke(token).await;
    }
    state.chat.end_session(user.id).await;
    state.wizards.lock().await.remove(&user.id);
    state.workouts.lock().await.remove(&user.id);
    Ok(Json(serde_json::json!({"ok": true})))
}
