//! Onboarding wizard endpoints.
//!
//! The wizard lives in memory only; the sole store write is the commit
//! on finishing the last step.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

use crate::error::{Error, OnboardingError};
use crate::onboarding::state::TOTAL_STEPS;
use crate::onboarding::{DraftUpdate, StepOutcome, WizardState};
use crate::routes::{AppState, authenticate};

fn wizard_status(wizard: &WizardState) -> serde_json::Value {
    let step = wizard.step();
    json!({
        "completed": false,
        "step": step,
        "step_number": step.number(),
        "total_steps": TOTAL_STEPS,
        "can_proceed": wizard.draft().can_proceed(step),
        "draft": wizard.draft(),
    })
}

/// GET /api/onboarding/status
pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let user = authenticate(&state, &headers).await?;
    if user.onboarding_completed {
        let profile = state.db.get_profile(user.id).await.map_err(Error::Store)?;
        return Ok(Json(json!({"completed": true, "profile": profile})));
    }

    let wizards = state.wizards.lock().await;
    match wizards.get(&user.id) {
        Some(wizard) => Ok(Json(wizard_status(wizard))),
        None => Ok(Json(json!({
            "completed": false,
            "step": null,
            "step_number": 0,
            "total_steps": TOTAL_STEPS,
        }))),
    }
}

/// POST /api/onboarding/answers
///
/// Applies a partial draft update, creating the wizard on first use.
pub async fn answers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<DraftUpdate>,
) -> Result<impl IntoResponse, Error> {
    let user = authenticate(&state, &headers).await?;
    if user.onboarding_completed {
        return Err(Error::Onboarding(OnboardingError::AlreadyCompleted {
            user_id: user.id,
        }));
    }

    let mut wizards = state.wizards.lock().await;
    let wizard = wizards
        .entry(user.id)
        .or_insert_with(|| WizardState::with_name(&user.display_name));
    wizard.update(update);
    Ok(Json(wizard_status(wizard)))
}

/// POST /api/onboarding/next
///
/// Advances past the current step when its gate passes. Finishing the
/// last step commits the profile atomically and drops the wizard.
pub async fn next(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let user = authenticate(&state, &headers).await?;
    if user.onboarding_completed {
        return Err(Error::Onboarding(OnboardingError::AlreadyCompleted {
            user_id: user.id,
        }));
    }

    let mut wizards = state.wizards.lock().await;
    let wizard = wizards
        .get_mut(&user.id)
        .ok_or(Error::Onboarding(OnboardingError::NotStarted {
            user_id: user.id,
        }))?;

    match wizard.advance().map_err(Error::Onboarding)? {
        StepOutcome::Advanced(_) => Ok(Json(wizard_status(wizard))),
        StepOutcome::Completed {
            display_name,
            profile,
        } => {
            state
                .db
                .commit_onboarding(user.id, &display_name, &profile)
                .await
                .map_err(Error::Store)?;
            wizards.remove(&user.id);
            info!(user_id = %user.id, "Onboarding completed");
            Ok(Json(json!({"completed": true, "profile": profile})))
        }
    }
}

/// POST /api/onboarding/back
pub async fn back(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let user = authenticate(&state, &headers).await?;
    let mut wizards = state.wizards.lock().await;
    let wizard = wizards
        .get_mut(&user.id)
        .ok_or(Error::Onboarding(OnboardingError::NotStarted {
            user_id: user.id,
        }))?;
    wizard.back();
    Ok(Json(wizard_status(wizard)))
}
