//! Derived statistics over the mood journal.
//!
//! Every function here is total: empty input degrades to a neutral
//! default instead of signaling failure, so downstream rendering never
//! has to branch on absence.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::journal::model::MoodEntry;

/// Neutral scale midpoint returned when an averaging window is empty.
pub const NEUTRAL_DEFAULT: f64 = 5.0;

/// Streaks are capped at this many days.
pub const STREAK_CAP: u32 = 30;

/// Difference at or below which two averages are considered stable.
pub const STABLE_THRESHOLD: f64 = 0.5;

/// Which scale field a statistic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    Mood,
    Energy,
    Anxiety,
}

impl MetricField {
    fn value(&self, entry: &MoodEntry) -> f64 {
        match self {
            Self::Mood => f64::from(entry.mood),
            Self::Energy => f64::from(entry.energy),
            Self::Anxiety => f64::from(entry.anxiety),
        }
    }
}

/// Direction of change between two averaging windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Mean of `field` over the last `window` entries in insertion order.
///
/// Returns [`NEUTRAL_DEFAULT`] when the window is empty. The window is
/// positional, not calendar-based: "last 7 entries" may span any number
/// of real days.
pub fn rolling_average(entries: &[MoodEntry], field: MetricField, window: usize) -> f64 {
    let tail = &entries[entries.len().saturating_sub(window)..];
    if tail.is_empty() {
        return NEUTRAL_DEFAULT;
    }
    let sum: f64 = tail.iter().map(|e| field.value(e)).sum();
    sum / tail.len() as f64
}

/// Classify the change between a current and previous average.
///
/// A difference of exactly [`STABLE_THRESHOLD`] is Stable; the
/// threshold is exclusive on the changed side.
pub fn trend(current: f64, previous: f64) -> Trend {
    let delta = current - previous;
    if delta.abs() <= STABLE_THRESHOLD {
        Trend::Stable
    } else if delta > 0.0 {
        Trend::Improving
    } else {
        Trend::Declining
    }
}

/// Count consecutive calendar days with at least one entry, walking
/// backward from `as_of`.
///
/// A day counts once regardless of how many entries it holds. The walk
/// stops at the first empty day and is hard-capped at [`STREAK_CAP`].
pub fn current_streak(entries: &[MoodEntry], as_of: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_CAP {
        let day = match as_of.checked_sub_days(Days::new(u64::from(offset))) {
            Some(d) => d,
            None => break,
        };
        let has_entry = entries.iter().any(|e| e.recorded_at.date_naive() == day);
        if has_entry {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Percentage of the last 7 calendar days covered by entries, rounded
/// to the nearest integer and capped at 100.
pub fn weekly_completion(entries: &[MoodEntry], as_of: NaiveDate) -> u32 {
    let week_start = as_of
        .checked_sub_days(Days::new(6))
        .unwrap_or(NaiveDate::MIN);
    let in_week = entries
        .iter()
        .filter(|e| {
            let day = e.recorded_at.date_naive();
            day >= week_start && day <= as_of
        })
        .count()
        .min(7);
    ((in_week as f64 / 7.0) * 100.0).round() as u32
}

/// Averages of `field` over the last 7 entries and the 7 before those,
/// by insertion order.
///
/// An empty window here averages to 0.0, not the neutral default, so
/// with no previous window `trend(current, 0.0)` reads Improving
/// whenever current > 0.5.
pub fn week_over_week(entries: &[MoodEntry], field: MetricField) -> (f64, f64) {
    let mean = |slice: &[MoodEntry]| -> f64 {
        if slice.is_empty() {
            0.0
        } else {
            slice.iter().map(|e| field.value(e)).sum::<f64>() / slice.len() as f64
        }
    };
    let len = entries.len();
    let current = &entries[len.saturating_sub(7)..];
    let previous = &entries[len.saturating_sub(14)..len.saturating_sub(7)];
    (mean(current), mean(previous))
}

/// Aggregate snapshot consumed by the dashboard and the coach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSummary {
    pub entry_count: usize,
    /// Rolling 7-entry averages (neutral 5.0 when empty).
    pub avg_mood: f64,
    pub avg_energy: f64,
    pub avg_anxiety: f64,
    /// Previous-window averages (0.0 when empty).
    pub prev_mood: f64,
    pub prev_energy: f64,
    pub prev_anxiety: f64,
    pub mood_trend: Trend,
    pub energy_trend: Trend,
    pub anxiety_trend: Trend,
    pub streak_days: u32,
    pub weekly_completion_pct: u32,
}

impl JournalSummary {
    /// Compute the full summary for a user's journal as of a given day.
    pub fn compute(entries: &[MoodEntry], as_of: NaiveDate) -> Self {
        let (cur_mood, prev_mood) = week_over_week(entries, MetricField::Mood);
        let (cur_energy, prev_energy) = week_over_week(entries, MetricField::Energy);
        let (cur_anxiety, prev_anxiety) = week_over_week(entries, MetricField::Anxiety);
        Self {
            entry_count: entries.len(),
            avg_mood: rolling_average(entries, MetricField::Mood, 7),
            avg_energy: rolling_average(entries, MetricField::Energy, 7),
            avg_anxiety: rolling_average(entries, MetricField::Anxiety, 7),
            prev_mood,
            prev_energy,
            prev_anxiety,
            mood_trend: trend(cur_mood, prev_mood),
            energy_trend: trend(cur_energy, prev_energy),
            anxiety_trend: trend(cur_anxiety, prev_anxiety),
            streak_days: current_streak(entries, as_of),
            weekly_completion_pct: weekly_completion(entries, as_of),
        }
    }
}

/// Category of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Suggestion,
    Achievement,
}

/// A short personalized observation shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub body: String,
}

/// Generate dashboard insights from a summary.
pub fn insights(summary: &JournalSummary) -> Vec<Insight> {
    let mut out = Vec::new();

    if summary.entry_count > 0 && summary.avg_mood >= 7.0 {
        out.push(Insight {
            kind: InsightKind::Positive,
            title: "Great progress!".into(),
            body: "Your mood has been consistently high. Keep up the great work!".into(),
        });
    }
    if summary.entry_count > 0 && summary.avg_energy < 5.0 {
        out.push(Insight {
            kind: InsightKind::Suggestion,
            title: "Energy boost needed".into(),
            body: "Try a 10-minute walk or some light stretching to boost your energy.".into(),
        });
    }
    if summary.entry_count > 0 && summary.avg_anxiety > 6.0 {
        out.push(Insight {
            kind: InsightKind::Suggestion,
            title: "Stress management".into(),
            body: "Consider trying a 5-minute breathing exercise when you feel anxious.".into(),
        });
    }
    if summary.streak_days >= 7 {
        out.push(Insight {
            kind: InsightKind::Achievement,
            title: "Week warrior!".into(),
            body: format!(
                "Amazing! You've logged {} days in a row. Consistency is key!",
                summary.streak_days
            ),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn entry_on(days_ago: i64, mood: u8) -> MoodEntry {
        let base = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();
        MoodEntry {
            id: Uuid::new_v4(),
            recorded_at: base - Duration::days(days_ago),
            mood,
            energy: 5,
            anxiety: 5,
            note: None,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn empty_window_returns_neutral_default() {
        assert_eq!(rolling_average(&[], MetricField::Mood, 7), 5.0);
        assert_eq!(rolling_average(&[], MetricField::Energy, 7), 5.0);
        let one = vec![entry_on(0, 8)];
        // Window size 0 over a non-empty journal is still an empty window.
        assert_eq!(rolling_average(&one, MetricField::Mood, 0), 5.0);
    }

    #[test]
    fn rolling_average_uses_insertion_order_not_calendar() {
        // Three entries, all on the same day; the window is positional.
        let entries = vec![entry_on(0, 2), entry_on(0, 4), entry_on(0, 9)];
        let avg = rolling_average(&entries, MetricField::Mood, 2);
        assert!((avg - 6.5).abs() < 1e-9);
    }

    #[test]
    fn seven_entry_average_matches_expected() {
        let moods = [4, 5, 6, 7, 8, 9, 9];
        let entries: Vec<MoodEntry> = moods
            .iter()
            .enumerate()
            .map(|(i, &m)| entry_on(6 - i as i64, m))
            .collect();
        let avg = rolling_average(&entries, MetricField::Mood, 7);
        assert!((avg - 6.857).abs() < 0.01);

        // Previous window is empty and averages to 0, so the trend
        // reads Improving rather than "no data".
        let (cur, prev) = week_over_week(&entries, MetricField::Mood);
        assert!((cur - 6.857).abs() < 0.01);
        assert_eq!(prev, 0.0);
        assert_eq!(trend(cur, prev), Trend::Improving);
    }

    #[test]
    fn trend_boundary_is_stable() {
        assert_eq!(trend(5.5, 5.0), Trend::Stable);
        assert_eq!(trend(5.0, 5.5), Trend::Stable);
        assert_eq!(trend(5.51, 5.0), Trend::Improving);
        assert_eq!(trend(5.0, 5.51), Trend::Declining);
        assert_eq!(trend(5.0, 5.0), Trend::Stable);
    }

    #[test]
    fn streak_counts_duplicate_days_once() {
        let entries = vec![entry_on(0, 5), entry_on(0, 7), entry_on(1, 6)];
        assert_eq!(current_streak(&entries, as_of()), 2);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        // Days 0, 1, 3: the gap at day 2 terminates the streak.
        let entries = vec![entry_on(0, 5), entry_on(1, 5), entry_on(3, 5)];
        assert_eq!(current_streak(&entries, as_of()), 2);
    }

    #[test]
    fn streak_is_capped_at_30() {
        let entries: Vec<MoodEntry> = (0..45).map(|d| entry_on(d, 6)).collect();
        assert_eq!(current_streak(&entries, as_of()), 30);
    }

    #[test]
    fn streak_zero_without_entry_today() {
        let entries = vec![entry_on(1, 5), entry_on(2, 5)];
        assert_eq!(current_streak(&entries, as_of()), 0);
    }

    #[test]
    fn weekly_completion_caps_at_100() {
        // Ten entries within the last 7 days (some same-day).
        let entries: Vec<MoodEntry> = (0..10).map(|i| entry_on(i64::from(i % 5), 6)).collect();
        assert_eq!(weekly_completion(&entries, as_of()), 100);
    }

    #[test]
    fn weekly_completion_partial_week() {
        let entries = vec![entry_on(0, 5), entry_on(1, 5), entry_on(2, 5)];
        // 3/7 = 42.857 → 43
        assert_eq!(weekly_completion(&entries, as_of()), 43);
        assert_eq!(weekly_completion(&[], as_of()), 0);
    }

    #[test]
    fn summary_on_empty_journal_is_neutral() {
        let summary = JournalSummary::compute(&[], as_of());
        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.avg_mood, 5.0);
        assert_eq!(summary.prev_mood, 0.0);
        assert_eq!(summary.streak_days, 0);
        assert_eq!(summary.weekly_completion_pct, 0);
        // 0.0 vs 0.0 is stable.
        assert_eq!(summary.mood_trend, Trend::Stable);
    }

    #[test]
    fn insights_rules_fire_on_thresholds() {
        let mut summary = JournalSummary::compute(&[], as_of());
        assert!(insights(&summary).is_empty());

        summary.entry_count = 7;
        summary.avg_mood = 7.5;
        summary.avg_energy = 4.0;
        summary.avg_anxiety = 7.0;
        summary.streak_days = 8;
        let all = insights(&summary);
        assert_eq!(all.len(), 4);
        assert!(all.iter().any(|i| i.kind == InsightKind::Achievement));
    }
}
