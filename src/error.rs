//! Error types for the wellness coach service.

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Coach error: {0}")]
    Coach(#[from] CoachError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Account and credential errors.
///
/// Unknown email and wrong password both surface as `InvalidCredentials`
/// with an identical message, so a caller cannot probe which accounts
/// exist.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Onboarding wizard errors.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Step {step} is incomplete: {reason}")]
    StepIncomplete { step: u8, reason: String },

    #[error("No onboarding in progress for user {user_id}")]
    NotStarted { user_id: Uuid },

    #[error("Onboarding already completed for user {user_id}")]
    AlreadyCompleted { user_id: Uuid },
}

/// Coach responder errors.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("Invalid responder rule {name}: {source}")]
    Rule {
        name: &'static str,
        source: regex::Error,
    },
}

/// HTTP session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Missing or invalid session token")]
    Unauthenticated,

    #[error("Onboarding must be completed first")]
    OnboardingRequired,

    #[error("No workout session is active")]
    NoActiveWorkout,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
