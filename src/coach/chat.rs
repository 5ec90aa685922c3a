//! In-memory chat transcripts and the delayed-reply scheduler.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::coach::rules::RulesEngine;
use crate::coach::templates;
use crate::error::CoachError;
use crate::journal::JournalSummary;
use crate::onboarding::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Coach,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            sent_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct ChatSession {
    messages: Vec<ChatMessage>,
    /// Replies scheduled but not yet delivered.
    pending: Vec<JoinHandle<()>>,
}

/// Per-user chat transcripts with delayed coach replies.
///
/// The reply is computed at send time from the message, profile, and
/// journal summary, then appended after a fixed delay to mimic typing.
/// Pending replies are tied to the session: tearing the session down
/// aborts them, so a reply can never land on dead state.
pub struct ChatService {
    engine: RulesEngine,
    reply_delay: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, ChatSession>>>,
}

impl ChatService {
    pub fn new(reply_delay: Duration) -> Result<Self, CoachError> {
        Ok(Self {
            engine: RulesEngine::new()?,
            reply_delay,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Full transcript, creating the session with a welcome message on
    /// first access.
    pub async fn history(&self, user_id: Uuid, display_name: &str) -> Vec<ChatMessage> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(user_id).or_insert_with(|| ChatSession {
            messages: vec![ChatMessage::new(
                ChatRole::Coach,
                templates::welcome(display_name),
            )],
            pending: Vec::new(),
        });
        session.messages.clone()
    }

    /// Append the user's message and schedule the coach reply.
    ///
    /// Returns the appended user message. The reply text is fixed here
    /// and only its delivery is delayed.
    pub async fn send(
        &self,
        user_id: Uuid,
        display_name: &str,
        input: &str,
        profile: &UserProfile,
        summary: &JournalSummary,
    ) -> ChatMessage {
        let topic = self.engine.classify(input);
        let reply = templates::respond(topic, profile, summary);
        let user_message = ChatMessage::new(ChatRole::User, input.to_string());

        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(user_id).or_insert_with(|| ChatSession {
            messages: vec![ChatMessage::new(
                ChatRole::Coach,
                templates::welcome(display_name),
            )],
            pending: Vec::new(),
        });
        session.messages.push(user_message.clone());
        session.pending.retain(|handle| !handle.is_finished());

        let sessions_ref = Arc::clone(&self.sessions);
        let delay = self.reply_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut sessions = sessions_ref.lock().await;
            if let Some(session) = sessions.get_mut(&user_id) {
                session
                    .messages
                    .push(ChatMessage::new(ChatRole::Coach, reply));
            }
        });
        session.pending.push(handle);

        user_message
    }

    /// Drop the transcript and abort any undelivered replies.
    pub async fn end_session(&self, user_id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.remove(&user_id) {
            for handle in session.pending {
                handle.abort();
            }
            debug!(%user_id, "Chat session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::FitnessLevel;
    use crate::onboarding::model::{NO_LIMITATIONS, NO_RESTRICTIONS};
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            age: 40,
            height_cm: 175.0,
            weight_kg: 70.0,
            physical_medical_issues: vec![],
            mental_health_challenges: vec![],
            allergies: vec![],
            physical_limitations: vec![NO_LIMITATIONS.into()],
            dietary_restrictions: vec![NO_RESTRICTIONS.into()],
            fitness_level: FitnessLevel::Beginner,
            goals: vec!["general".into()],
            preferred_exercise_types: vec!["Walking/Light cardio".into()],
        }
    }

    fn summary() -> JournalSummary {
        JournalSummary::compute(&[], NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    #[tokio::test]
    async fn first_access_seeds_a_welcome_message() {
        let svc = ChatService::new(Duration::from_millis(5)).unwrap();
        let user = Uuid::new_v4();
        let history = svc.history(user, "Alice").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, ChatRole::Coach);
        assert!(history[0].content.contains("Alice"));
    }

    #[tokio::test]
    async fn reply_arrives_after_the_delay() {
        let svc = ChatService::new(Duration::from_millis(10)).unwrap();
        let user = Uuid::new_v4();

        svc.send(user, "Alice", "suggest a workout", &profile(), &summary())
            .await;
        let before = svc.history(user, "Alice").await;
        // Welcome + user message; the coach reply is still pending.
        assert_eq!(before.len(), 2);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let after = svc.history(user, "Alice").await;
        assert_eq!(after.len(), 3);
        assert_eq!(after[2].role, ChatRole::Coach);
        assert!(after[2].content.contains("Fitness"));
    }

    #[tokio::test]
    async fn teardown_cancels_pending_replies() {
        let svc = ChatService::new(Duration::from_millis(50)).unwrap();
        let user = Uuid::new_v4();

        svc.send(user, "Alice", "suggest a workout", &profile(), &summary())
            .await;
        svc.end_session(user).await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        // A fresh session: only the welcome message, no stray reply.
        let history = svc.history(user, "Alice").await;
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn replies_do_not_depend_on_prior_turns() {
        let svc = ChatService::new(Duration::from_millis(1)).unwrap();
        let user = Uuid::new_v4();

        svc.send(user, "Alice", "what should I eat", &profile(), &summary())
            .await;
        svc.send(user, "Alice", "what should I eat", &profile(), &summary())
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let history = svc.history(user, "Alice").await;
        let replies: Vec<&ChatMessage> = history
            .iter()
            .filter(|m| m.role == ChatRole::Coach)
            .skip(1)
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].content, replies[1].content);
    }
}
