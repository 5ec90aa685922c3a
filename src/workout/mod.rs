//! Guided workout sessions with a per-second countdown.

pub mod session;

pub use session::{SessionPhase, WorkoutSession, spawn_tick_task};
