//! Field validation for signup forms.
//!
//! Validation failures are surfaced as per-field messages and never
//! abort the session; callers render them inline.

use crate::error::AuthError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate a display name: non-empty, at least two characters.
pub fn validate_name(name: &str) -> Result<(), AuthError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AuthError::Validation {
            field: "name".into(),
            message: "Name is required".into(),
        });
    }
    if trimmed.chars().count() < 2 {
        return Err(AuthError::Validation {
            field: "name".into(),
            message: "Name must be at least 2 characters".into(),
        });
    }
    Ok(())
}

/// Validate an email address shape: one `@` with non-empty local part
/// and a domain containing a dot.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let trimmed = email.trim();
    let invalid = || AuthError::Validation {
        field: "email".into(),
        message: "Please enter a valid email address".into(),
    };
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }
    Ok(())
}

/// Validate a password: minimum length only. Strength hints are a UI
/// concern, not a gate.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation {
            field: "password".into(),
            message: format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("A").is_err());
        assert!(validate_name("Al").is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("alice@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn validation_error_names_the_field() {
        match validate_password("x") {
            Err(AuthError::Validation { field, .. }) => assert_eq!(field, "password"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
