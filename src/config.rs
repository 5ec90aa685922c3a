//! Configuration types.

use std::time::Duration;

/// Server configuration, read from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port for the REST API.
    pub port: u16,
    /// Path to the libSQL database file.
    pub db_path: String,
    /// Artificial delay before a coach reply is delivered.
    pub coach_reply_delay: Duration,
    /// Idle lifetime of a login session.
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: "./data/wellness-coach.db".to_string(),
            coach_reply_delay: Duration::from_millis(1500),
            session_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl ServerConfig {
    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("WELLNESS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let db_path =
            std::env::var("WELLNESS_DB_PATH").unwrap_or_else(|_| defaults.db_path.clone());

        let coach_reply_delay = std::env::var("WELLNESS_COACH_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.coach_reply_delay);

        let session_ttl = std::env::var("WELLNESS_SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_ttl);

        Self {
            port,
            db_path,
            coach_reply_delay,
            session_ttl,
        }
    }
}
