//! Mood entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bounds of the mood/energy/anxiety scales.
pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 10;

/// A single wellness check-in.
///
/// Entries are append-only: once recorded they are never mutated or
/// deleted. Multiple entries on the same calendar day are permitted and
/// never deduplicated; the journal is ordered by submission, not by
/// day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// Mood on a 1–10 scale.
    pub mood: u8,
    /// Energy on a 1–10 scale.
    pub energy: u8,
    /// Anxiety on a 1–10 scale.
    pub anxiety: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodEntry {
    /// Create a detailed entry. Scale values are clamped into 1..=10.
    pub fn new(mood: u8, energy: u8, anxiety: u8, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            mood: clamp_scale(mood),
            energy: clamp_scale(energy),
            anxiety: clamp_scale(anxiety),
            note: note.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Create a quick entry: mood only, neutral energy/anxiety.
    pub fn quick(mood: u8) -> Self {
        Self::new(mood, 5, 5, Some("Quick mood entry".to_string()))
    }
}

fn clamp_scale(value: u8) -> u8 {
    value.clamp(SCALE_MIN, SCALE_MAX)
}
