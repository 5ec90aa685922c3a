//! The committed user profile produced by the wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Self-reported fitness level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

/// Everything the plan generators and the coach know about a user.
///
/// Exists only once onboarding completes; edits replace the record
/// wholesale rather than patching individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Physical issues and medical conditions, merged.
    pub physical_medical_issues: Vec<String>,
    pub mental_health_challenges: Vec<String>,
    pub allergies: Vec<String>,
    /// Defaults to `["None of the above"]` when nothing was selected.
    pub physical_limitations: Vec<String>,
    /// Defaults to `["None"]` when nothing was selected.
    pub dietary_restrictions: Vec<String>,
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
    pub preferred_exercise_types: Vec<String>,
}

/// Sentinel tag meaning no physical limitations were reported.
pub const NO_LIMITATIONS: &str = "None of the above";

/// Sentinel tag meaning no dietary restrictions were reported.
pub const NO_RESTRICTIONS: &str = "None";

impl UserProfile {
    /// True when the profile reports any real physical limitation.
    pub fn has_physical_limitations(&self) -> bool {
        self.physical_limitations
            .iter()
            .any(|l| l != NO_LIMITATIONS)
    }

    /// True when the profile reports any real dietary restriction.
    pub fn has_dietary_restrictions(&self) -> bool {
        self.dietary_restrictions.iter().any(|r| r != NO_RESTRICTIONS)
    }

    /// True when weight management is among the stated goals.
    pub fn wants_weight_management(&self) -> bool {
        self.goals.iter().any(|g| g.contains("weight"))
    }
}
