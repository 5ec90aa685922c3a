//! Mood journal: append-only wellness entries and derived statistics.

pub mod model;
pub mod stats;

pub use model::MoodEntry;
pub use stats::{JournalSummary, MetricField, Trend};
