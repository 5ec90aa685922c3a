//! Backend-agnostic `Database` trait.
//!
//! Each entity lives under its own key: user rows, one profile row per
//! user, append-only mood entry rows. Writers never rewrite unrelated
//! records, so concurrent updates to different entities cannot clobber
//! each other.

use async_trait::async_trait;
use uuid::Uuid;

use crate::accounts::UserCredential;
use crate::error::StoreError;
use crate::journal::MoodEntry;
use crate::onboarding::UserProfile;

#[async_trait]
pub trait Database: Send + Sync {
    // ── Users ───────────────────────────────────────────────────────

    /// Insert a new account. Fails with `Constraint` on duplicate email.
    async fn insert_user(&self, user: &UserCredential) -> Result<(), StoreError>;

    /// Look up an account by (lowercased) email.
    async fn get_user_by_email(&self, email: &str)
    -> Result<Option<UserCredential>, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<UserCredential>, StoreError>;

    // ── Onboarding & profile ────────────────────────────────────────

    /// Commit a finished wizard in one transaction: store the profile,
    /// update the display name, and flip the completion flag. Nothing
    /// is written if any part fails.
    async fn commit_onboarding(
        &self,
        user_id: Uuid,
        display_name: &str,
        profile: &UserProfile,
    ) -> Result<(), StoreError>;

    /// Replace the profile wholesale.
    async fn put_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<(), StoreError>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    // ── Mood journal ────────────────────────────────────────────────

    /// Append one entry. Entries are never updated or deleted.
    async fn append_mood_entry(
        &self,
        user_id: Uuid,
        entry: &MoodEntry,
    ) -> Result<(), StoreError>;

    /// All entries for the user, in insertion order.
    async fn list_mood_entries(&self, user_id: Uuid) -> Result<Vec<MoodEntry>, StoreError>;
}
