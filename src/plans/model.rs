//! Plan data structures.

use serde::{Deserialize, Serialize};

/// One timed exercise within a workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Countdown length in seconds.
    pub duration_secs: u32,
    pub description: String,
    pub instructions: Vec<String>,
    /// Accessibility adjustments, empty when none apply.
    pub adaptations: Vec<String>,
    /// Suggested rest after the exercise, seconds.
    pub rest_after_secs: u32,
}

/// A generated workout session plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub title: String,
    /// Nominal total length in minutes.
    pub total_duration_mins: u32,
    pub exercises: Vec<Exercise>,
}

/// Wellness angle a meal is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealBoost {
    Mood,
    Energy,
    StressRelief,
}

/// One meal or snack in the daily plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    /// Suggested clock time, e.g. "7:00 AM".
    pub time: String,
    pub calories: u32,
    pub description: String,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub prep_time: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<MealBoost>,
}

/// Target macro split, percentages summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// A generated daily nutrition plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub title: String,
    pub subtitle: String,
    pub total_calories: u32,
    pub macros: MacroSplit,
    pub meals: Vec<Meal>,
    pub tips: Vec<String>,
    /// Present only when the profile reports physical limitations.
    pub adaptations: Vec<String>,
}
