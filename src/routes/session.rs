//! In-memory login sessions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use uuid::Uuid;

struct SessionEntry {
    user_id: Uuid,
    expires_at: Instant,
}

/// Bearer-token session map with a fixed TTL.
///
/// Tokens are opaque UUIDs; expired entries are purged lazily on each
/// issue so the map cannot grow unbounded.
pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Mint a fresh token for the user.
    pub async fn issue(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    /// Look up a token, rejecting expired ones.
    pub async fn resolve(&self, token: &str) -> Option<Uuid> {
        let entries = self.entries.lock().await;
        let entry = entries.get(token)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.user_id)
    }

    /// Remove a token. Returns the user it belonged to, if any.
    pub async fn revoke(&self, token: &str) -> Option<Uuid> {
        self.entries
            .lock()
            .await
            .remove(token)
            .map(|e| e.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issue_resolve_revoke() {
        let store = SessionStore::new(Duration::from_secs(60));
        let user = Uuid::new_v4();

        let token = store.issue(user).await;
        assert_eq!(store.resolve(&token).await, Some(user));

        assert_eq!(store.revoke(&token).await, Some(user));
        assert_eq!(store.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let store = SessionStore::new(Duration::from_millis(0));
        let token = store.issue(Uuid::new_v4()).await;
        assert_eq!(store.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn unknown_tokens_resolve_to_none() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.resolve("not-a-token").await, None);
        assert_eq!(store.revoke("not-a-token").await, None);
    }
}
