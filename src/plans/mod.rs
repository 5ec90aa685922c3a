//! Deterministic plan generation from a committed profile.
//!
//! Plans are derived values: never persisted, regenerated on every
//! request. The same profile always yields the same plan.

pub mod model;
pub mod nutrition;
pub mod workout;

pub use model::{Exercise, Meal, NutritionPlan, WorkoutPlan};
pub use nutrition::generate_nutrition_plan;
pub use workout::generate_workout_plan;
