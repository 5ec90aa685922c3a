//! libSQL implementation of the `Database` trait.
//!
//! Supports local file and in-memory databases. A single connection is
//! reused for all operations; `libsql::Connection` is `Send + Sync` and
//! safe for concurrent async use.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, Row, params};
use tracing::info;
use uuid::Uuid;

use crate::accounts::UserCredential;
use crate::error::StoreError;
use crate::journal::MoodEntry;
use crate::onboarding::UserProfile;
use crate::store::migrations;
use crate::store::traits::Database;

/// libSQL database backend.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Database opened");
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_default()
}

fn query_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Query(e.to_string())
}

/// Map unique-index violations to `Constraint`, everything else to
/// `Query`.
fn write_err(e: libsql::Error) -> StoreError {
    let message = e.to_string();
    if message.contains("UNIQUE") {
        StoreError::Constraint(message)
    } else {
        StoreError::Query(message)
    }
}

fn row_to_user(row: &Row) -> Result<UserCredential, StoreError> {
    Ok(UserCredential {
        id: parse_uuid(&row.get::<String>(0).map_err(query_err)?),
        display_name: row.get::<String>(1).map_err(query_err)?,
        email: row.get::<String>(2).map_err(query_err)?,
        password_hash: row.get::<String>(3).map_err(query_err)?,
        onboarding_completed: row.get::<i64>(4).map_err(query_err)? != 0,
        created_at: parse_datetime(&row.get::<String>(5).map_err(query_err)?),
    })
}

fn row_to_mood_entry(row: &Row) -> Result<MoodEntry, StoreError> {
    Ok(MoodEntry {
        id: parse_uuid(&row.get::<String>(0).map_err(query_err)?),
        recorded_at: parse_datetime(&row.get::<String>(1).map_err(query_err)?),
        mood: row.get::<i64>(2).map_err(query_err)? as u8,
        energy: row.get::<i64>(3).map_err(query_err)? as u8,
        anxiety: row.get::<i64>(4).map_err(query_err)? as u8,
        note: row.get::<Option<String>>(5).map_err(query_err)?,
    })
}

const USER_COLUMNS: &str =
    "id, display_name, email, password_hash, onboarding_completed, created_at";

#[async_trait]
impl Database for LibSqlBackend {
    async fn insert_user(&self, user: &UserCredential) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "INSERT INTO users (id, display_name, email, password_hash, \
                 onboarding_completed, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id.to_string(),
                    user.display_name.clone(),
                    user.email.clone(),
                    user.password_hash.clone(),
                    i64::from(user.onboarding_completed),
                    user.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(write_err)?;
        Ok(())
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredential>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
            )
            .await
            .map_err(query_err)?;

        match rows.next().await.map_err(query_err)? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserCredential>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(query_err)?;

        match rows.next().await.map_err(query_err)? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn commit_onboarding(
        &self,
        user_id: Uuid,
        display_name: &str,
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_string(profile)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        let tx = self
            .conn()
            .transaction()
            .await
            .map_err(|e| StoreError::Query(format!("Failed to begin transaction: {e}")))?;

        let updated = tx
            .execute(
                "UPDATE users SET display_name = ?1, onboarding_completed = 1 WHERE id = ?2",
                params![display_name, user_id.to_string()],
            )
            .await
            .map_err(query_err)?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "user".to_string(),
                id: user_id.to_string(),
            });
        }

        tx.execute(
            "INSERT INTO profiles (user_id, data, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(user_id) DO UPDATE SET data = ?2, updated_at = ?3",
            params![user_id.to_string(), data, now],
        )
        .await
        .map_err(query_err)?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Query(format!("Failed to commit transaction: {e}")))?;
        Ok(())
    }

    async fn put_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<(), StoreError> {
        let data = serde_json::to_string(profile)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.conn()
            .execute(
                "INSERT INTO profiles (user_id, data, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(user_id) DO UPDATE SET data = ?2, updated_at = ?3",
                params![user_id.to_string(), data, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(write_err)?;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT data FROM profiles WHERE user_id = ?1",
                params![user_id.to_string()],
            )
            .await
            .map_err(query_err)?;

        match rows.next().await.map_err(query_err)? {
            Some(row) => {
                let data = row.get::<String>(0).map_err(query_err)?;
                let profile = serde_json::from_str(&data)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn append_mood_entry(
        &self,
        user_id: Uuid,
        entry: &MoodEntry,
    ) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "INSERT INTO mood_entries (id, user_id, recorded_at, mood, energy, anxiety, \
                 note) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id.to_string(),
                    user_id.to_string(),
                    entry.recorded_at.to_rfc3339(),
                    i64::from(entry.mood),
                    i64::from(entry.energy),
                    i64::from(entry.anxiety),
                    entry.note.clone(),
                ],
            )
            .await
            .map_err(write_err)?;
        Ok(())
    }

    async fn list_mood_entries(&self, user_id: Uuid) -> Result<Vec<MoodEntry>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, recorded_at, mood, energy, anxiety, note \
                 FROM mood_entries WHERE user_id = ?1 ORDER BY rowid",
                params![user_id.to_string()],
            )
            .await
            .map_err(query_err)?;

        let mut entries = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            entries.push(row_to_mood_entry(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> UserCredential {
        UserCredential::new("Alice", email, "hash".to_string())
    }

    fn profile() -> UserProfile {
        use crate::onboarding::FitnessLevel;
        UserProfile {
            age: 34,
            height_cm: 170.0,
            weight_kg: 68.0,
            physical_medical_issues: vec!["arthritis".into()],
            mental_health_challenges: vec![],
            allergies: vec![],
            physical_limitations: vec!["None of the above".into()],
            dietary_restrictions: vec!["None".into()],
            fitness_level: FitnessLevel::Beginner,
            goals: vec!["general".into()],
            preferred_exercise_types: vec!["Walking/Light cardio".into()],
        }
    }

    #[tokio::test]
    async fn user_roundtrip_by_email_and_id() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        let u = user("alice@example.com");
        db.insert_user(&u).await.unwrap();

        let by_email = db
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, u.id);
        assert!(!by_email.onboarding_completed);

        let by_id = db.get_user(u.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        assert!(db.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_error() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        db.insert_user(&user("alice@example.com")).await.unwrap();
        let err = db.insert_user(&user("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn commit_onboarding_is_atomic_and_idempotent_per_user() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        let u = user("alice@example.com");
        db.insert_user(&u).await.unwrap();

        db.commit_onboarding(u.id, "Alice Smith", &profile())
            .await
            .unwrap();

        let updated = db.get_user(u.id).await.unwrap().unwrap();
        assert!(updated.onboarding_completed);
        assert_eq!(updated.display_name, "Alice Smith");
        assert!(db.get_profile(u.id).await.unwrap().is_some());

        // Unknown user commits nothing.
        let err = db
            .commit_onboarding(Uuid::new_v4(), "Ghost", &profile())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn put_profile_replaces_wholesale() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        let u = user("alice@example.com");
        db.insert_user(&u).await.unwrap();
        db.put_profile(u.id, &profile()).await.unwrap();

        let mut edited = profile();
        edited.age = 35;
        edited.goals = vec!["weight".into()];
        db.put_profile(u.id, &edited).await.unwrap();

        let stored = db.get_profile(u.id).await.unwrap().unwrap();
        assert_eq!(stored.age, 35);
        assert_eq!(stored.goals, vec!["weight".to_string()]);
    }

    #[tokio::test]
    async fn mood_entries_come_back_in_insertion_order() {
        let db = LibSqlBackend::new_memory().await.unwrap();
        let u = user("alice@example.com");
        db.insert_user(&u).await.unwrap();

        for mood in [3, 7, 5] {
            db.append_mood_entry(u.id, &MoodEntry::new(mood, 5, 5, None))
                .await
                .unwrap();
        }

        let entries = db.list_mood_entries(u.id).await.unwrap();
        let moods: Vec<u8> = entries.iter().map(|e| e.mood).collect();
        assert_eq!(moods, vec![3, 7, 5]);

        // Entries are scoped per user.
        assert!(db.list_mood_entries(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
