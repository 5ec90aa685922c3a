//! Workout session state machine and its tick driver.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::plans::WorkoutPlan;

/// Where a session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Created but the countdown has not started.
    Idle,
    Running,
    Paused,
    /// The countdown reached zero; waiting for the user to move on.
    ExerciseComplete,
}

/// One user's active workout: the plan plus countdown state.
///
/// A session holds exactly one countdown at a time. Exercises completed
/// by running out the clock and by explicit completion land in the same
/// set, so an exercise is never counted twice.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSession {
    pub plan: WorkoutPlan,
    pub current: usize,
    pub remaining_secs: u32,
    pub phase: SessionPhase,
    pub completed: BTreeSet<usize>,
}

impl WorkoutSession {
    pub fn new(plan: WorkoutPlan) -> Self {
        let remaining = plan.exercises.first().map(|e| e.duration_secs).unwrap_or(0);
        Self {
            plan,
            current: 0,
            remaining_secs: remaining,
            phase: SessionPhase::Idle,
            completed: BTreeSet::new(),
        }
    }

    fn current_duration(&self) -> u32 {
        self.plan
            .exercises
            .get(self.current)
            .map(|e| e.duration_secs)
            .unwrap_or(0)
    }

    /// Begin the countdown for the current exercise.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Idle {
            self.remaining_secs = self.current_duration();
        }
        self.phase = SessionPhase::Running;
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Running;
        }
    }

    /// Reseed the current exercise's full duration and stop the clock.
    /// Completed exercises stay completed.
    pub fn reset(&mut self) {
        self.remaining_secs = self.current_duration();
        self.phase = SessionPhase::Idle;
    }

    /// Advance the countdown by one second.
    ///
    /// Only a Running session ticks. Reaching zero stops the clock and
    /// marks the current exercise complete; the set insert makes the
    /// completion idempotent across reset and re-run.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = SessionPhase::ExerciseComplete;
            self.completed.insert(self.current);
        }
    }

    /// Mark the current exercise done and move to the next one.
    ///
    /// Returns true when this was the last exercise and the session is
    /// over.
    pub fn complete_exercise(&mut self) -> bool {
        self.completed.insert(self.current);
        if self.current + 1 < self.plan.exercises.len() {
            self.current += 1;
            self.remaining_secs = self.current_duration();
            self.phase = SessionPhase::Idle;
            false
        } else {
            true
        }
    }

    /// Jump directly to exercise `index`, reseeding its duration with
    /// the clock stopped. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.plan.exercises.len() {
            return false;
        }
        self.current = index;
        self.remaining_secs = self.current_duration();
        self.phase = SessionPhase::Idle;
        true
    }

    /// Fraction of exercises completed, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.plan.exercises.is_empty() {
            return 0.0;
        }
        self.completed.len() as f64 / self.plan.exercises.len() as f64
    }
}

/// Active sessions, keyed by user.
pub type SharedSessions = Arc<Mutex<HashMap<Uuid, WorkoutSession>>>;

/// Spawn the once-per-second driver that ticks every active session.
///
/// One task drives all sessions; individual sessions never own timers,
/// so pausing or jumping can never leave a stray countdown behind.
pub fn spawn_tick_task(sessions: SharedSessions) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let mut guard = sessions.lock().await;
            for (user_id, session) in guard.iter_mut() {
                let before = session.phase;
                session.tick();
                if before == SessionPhase::Running && session.phase == SessionPhase::ExerciseComplete
                {
                    debug!(%user_id, exercise = session.current, "Exercise countdown finished");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{NO_LIMITATIONS, NO_RESTRICTIONS};
    use crate::onboarding::{FitnessLevel, UserProfile};
    use crate::plans::generate_workout_plan;

    fn session() -> WorkoutSession {
        let profile = UserProfile {
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
        };
        WorkoutSession::new(generate_workout_plan(&profile))
    }

    #[test]
    fn ticks_only_while_running() {
        let mut s = session();
        let initial = s.remaining_secs;
        s.tick();
        assert_eq!(s.remaining_secs, initial);

        s.start();
        s.tick();
        assert_eq!(s.remaining_secs, initial - 1);

        s.pause();
        s.tick();
        assert_eq!(s.remaining_secs, initial - 1);

        s.resume();
        s.tick();
        assert_eq!(s.remaining_secs, initial - 2);
    }

    #[test]
    fn run_to_zero_completes_exactly_once() {
        let mut s = session();
        s.start();
        let duration = s.remaining_secs;
        for _ in 0..duration {
            s.tick();
        }
        assert_eq!(s.phase, SessionPhase::ExerciseComplete);
        assert_eq!(s.completed.len(), 1);

        // Further ticks do nothing once the countdown stopped.
        s.tick();
        assert_eq!(s.remaining_secs, 0);
        assert_eq!(s.completed.len(), 1);

        // Reset and run out again: the exercise stays counted once.
        s.reset();
        assert_eq!(s.remaining_secs, duration);
        s.start();
        for _ in 0..duration {
            s.tick();
        }
        assert_eq!(s.completed.len(), 1);
    }

    #[test]
    fn reset_keeps_completed_set_and_index() {
        let mut s = session();
        s.start();
        s.complete_exercise();
        assert_eq!(s.current, 1);

        s.start();
        s.tick();
        s.reset();
        assert_eq!(s.current, 1);
        assert_eq!(s.remaining_secs, s.plan.exercises[1].duration_secs);
        assert_eq!(s.completed.len(), 1);
        assert_eq!(s.phase, SessionPhase::Idle);
    }

    #[test]
    fn completing_the_last_exercise_ends_the_session() {
        let mut s = session();
        let count = s.plan.exercises.len();
        for i in 0..count {
            let ended = s.complete_exercise();
            assert_eq!(ended, i == count - 1);
        }
        assert_eq!(s.completed.len(), count);
        assert!((s.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn jump_reseeds_with_the_clock_stopped() {
        let mut s = session();
        s.start();
        s.tick();
        assert!(s.jump_to(2));
        assert_eq!(s.current, 2);
        assert_eq!(s.remaining_secs, s.plan.exercises[2].duration_secs);
        assert_eq!(s.phase, SessionPhase::Idle);

        assert!(!s.jump_to(99));
        assert_eq!(s.current, 2);
    }

    #[test]
    fn progress_counts_distinct_exercises() {
        let mut s = session();
        assert_eq!(s.progress(), 0.0);
        s.complete_exercise();
        assert!((s.progress() - 0.25).abs() < 1e-9);
    }
}
