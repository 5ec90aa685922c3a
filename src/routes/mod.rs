//! REST API surface.
//!
//! One router, JSON in and out. Authenticated routes carry a bearer
//! token from login; everything behind the profile gate additionally
//! requires completed onboarding.

pub mod auth;
pub mod coach;
pub mod mood;
pub mod onboarding;
pub mod pages;
pub mod plans;
pub mod profile;
pub mod session;
pub mod workout;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::accounts::{AccountService, UserCredential};
use crate::coach::ChatService;
use crate::config::ServerConfig;
use crate::error::{AuthError, Error, OnboardingError, SessionError, StoreError};
use crate::onboarding::{UserProfile, WizardState};
use crate::store::Database;
use crate::workout::session::SharedSessions;
use self::session::SessionStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub accounts: Arc<AccountService>,
    pub chat: Arc<ChatService>,
    pub sessions: Arc<SessionStore>,
    /// In-progress onboarding wizards, keyed by user. Dropped on
    /// logout: the wizard is single-shot and non-resumable.
    pub wizards: Arc<Mutex<HashMap<Uuid, WizardState>>>,
    pub workouts: SharedSessions,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>, config: &ServerConfig) -> Result<Self, Error> {
        Ok(Self {
            accounts: Arc::new(AccountService::new(Arc::clone(&db))),
            chat: Arc::new(ChatService::new(config.coach_reply_delay)?),
            sessions: Arc::new(SessionStore::new(config.session_ttl)),
            wizards: Arc::new(Mutex::new(HashMap::new())),
            workouts: SharedSessions::default(),
            db,
        })
    }
}

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/onboarding/status", get(onboarding::status))
        .route("/api/onboarding/answers", post(onboarding::answers))
        .route("/api/onboarding/next", post(onboarding::next))
        .route("/api/onboarding/back", post(onboarding::back))
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::put_profile),
        )
        .route("/api/mood", post(mood::add_entry).get(mood::list_entries))
        .route("/api/mood/quick", post(mood::add_quick_entry))
        .route("/api/mood/summary", get(mood::summary))
        .route("/api/plans/workout", get(plans::workout_plan))
        .route("/api/plans/nutrition", get(plans::nutrition_plan))
        .route(
            "/api/workout/session",
            get(workout::current).post(workout::start),
        )
        .route("/api/workout/session/pause", post(workout::pause))
        .route("/api/workout/session/resume", post(workout::resume))
        .route("/api/workout/session/reset", post(workout::reset))
        .route("/api/workout/session/complete", post(workout::complete))
        .route("/api/workout/session/jump", post(workout::jump))
        .route("/api/coach/message", post(coach::send_message))
        .route("/api/coach/history", get(coach::history))
        .route("/api/pages/{slug}", get(pages::page))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve the bearer token to a stored user.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<UserCredential, Error> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(Error::Session(SessionError::Unauthenticated))?;

    let user_id = state
        .sessions
        .resolve(token)
        .await
        .ok_or(Error::Session(SessionError::Unauthenticated))?;

    state
        .db
        .get_user(user_id)
        .await
        .map_err(Error::Store)?
        .ok_or(Error::Session(SessionError::Unauthenticated))
}

/// The profile gate: a valid session AND completed onboarding.
pub(crate) async fn require_onboarded(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(UserCredential, UserProfile), Error> {
    let user = authenticate(state, headers).await?;
    if !user.onboarding_completed {
        return Err(Error::Session(SessionError::OnboardingRequired));
    }
    let profile = state
        .db
        .get_profile(user.id)
        .await
        .map_err(Error::Store)?
        .ok_or(Error::Session(SessionError::OnboardingRequired))?;
    Ok((user, profile))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Auth(AuthError::DuplicateEmail) => (
                StatusCode::CONFLICT,
                serde_json::json!({"error": self.to_string(), "field": "email"}),
            ),
            Error::Auth(AuthError::Validation { field, message }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({"error": message, "field": field}),
            ),
            Error::Session(SessionError::Unauthenticated) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Session(SessionError::OnboardingRequired) => (
                StatusCode::FORBIDDEN,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Session(SessionError::NoActiveWorkout) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Onboarding(OnboardingError::StepIncomplete { step, reason }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({"error": reason, "step": step}),
            ),
            Error::Onboarding(OnboardingError::NotStarted { .. }) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Onboarding(OnboardingError::AlreadyCompleted { .. }) => (
                StatusCode::CONFLICT,
                serde_json::json!({"error": self.to_string()}),
            ),
            Error::Store(StoreError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": self.to_string()}),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Internal server error"}),
            ),
        };
        (status, axum::Json(body)).into_response()
    }
}
