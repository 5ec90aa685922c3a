//! Signup and credential checking against the store.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::accounts::model::{UserCredential, UserView};
use crate::accounts::validate;
use crate::error::{AuthError, Error, StoreError};
use crate::store::Database;

/// Account operations: signup and login.
pub struct AccountService {
    db: Arc<dyn Database>,
}

impl AccountService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Create a new account.
    ///
    /// Validates each field, rejects duplicate emails, and stores a
    /// bcrypt hash of the password. Email matching is case-insensitive
    /// (addresses are normalized to lowercase at the boundary).
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<UserView, Error> {
        validate::validate_name(name).map_err(Error::Auth)?;
        validate::validate_email(email).map_err(Error::Auth)?;
        validate::validate_password(password.expose_secret()).map_err(Error::Auth)?;

        let email = email.trim().to_lowercase();
        if self
            .db
            .get_user_by_email(&email)
            .await
            .map_err(Error::Store)?
            .is_some()
        {
            return Err(Error::Auth(AuthError::DuplicateEmail));
        }

        let password_hash = bcrypt::hash(password.expose_secret(), bcrypt::DEFAULT_COST)
            .map_err(|e| Error::Auth(AuthError::Hashing(e.to_string())))?;

        let credential = UserCredential::new(name.trim(), &email, password_hash);
        self.db
            .insert_user(&credential)
            .await
            .map_err(|e| match e {
                // Race on the unique index, report as the same field error.
                StoreError::Constraint(_) => Error::Auth(AuthError::DuplicateEmail),
                other => Error::Store(other),
            })?;

        info!(user_id = %credential.id, "Account created");
        Ok(credential.view())
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password return the identical
    /// `AuthError::InvalidCredentials`; the caller cannot distinguish
    /// the two cases.
    pub async fn check_credential(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserView, Error> {
        let email = email.trim().to_lowercase();
        let user = self
            .db
            .get_user_by_email(&email)
            .await
            .map_err(Error::Store)?
            .ok_or(Error::Auth(AuthError::InvalidCredentials))?;

        let matches = bcrypt::verify(password.expose_secret(), &user.password_hash)
            .unwrap_or(false);
        if !matches {
            return Err(Error::Auth(AuthError::InvalidCredentials));
        }

        Ok(user.view())
    }
}
