//! Credential records and their outward-facing projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user credential.
///
/// The password is stored as a bcrypt hash and never leaves the store
/// layer; route handlers only ever see a [`UserView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl UserCredential {
    /// Create a fresh credential with a pre-computed password hash.
    pub fn new(display_name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.to_string(),
            email: email.to_string(),
            password_hash,
            onboarding_completed: false,
            created_at: Utc::now(),
        }
    }

    /// The public projection of this credential.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            onboarding_completed: self.onboarding_completed,
        }
    }
}

/// Public projection of a [`UserCredential`], with no secret material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub onboarding_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_carries_no_hash() {
        let cred = UserCredential::new("Alice", "alice@example.com", "$2b$12$hash".into());
        let view = cred.view();
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("alice@example.com"));
    }

    #[test]
    fn credential_serialization_skips_hash() {
        let cred = UserCredential::new("Bob", "bob@example.com", "$2b$12$secret".into());
        let json = serde_json::to_string(&cred).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn new_credential_starts_unboarded() {
        let cred = UserCredential::new("Carol", "carol@example.com", "h".into());
        assert!(!cred.onboarding_completed);
    }
}
