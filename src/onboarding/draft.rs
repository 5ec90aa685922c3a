//! The in-progress wizard draft and its per-step gate predicates.

use serde::{Deserialize, Serialize};

use crate::onboarding::model::{
    FitnessLevel, NO_LIMITATIONS, NO_RESTRICTIONS, UserProfile,
};
use crate::onboarding::state::WizardStep;

const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.453592;

/// Option tag whose free-text companion field gets folded into the
/// profile in place of the tag itself.
const OTHER_TAG: &str = "other";

/// A yes/no question that starts unanswered.
///
/// Distinct from a plain bool: several steps gate on "has this been
/// answered at all", not just on which answer was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Unset,
    No,
    Yes,
}

impl TriState {
    pub fn is_answered(self) -> bool {
        self != Self::Unset
    }
}

/// Height as entered, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum HeightInput {
    Cm { value: f64 },
    FtIn { feet: u32, inches: u32 },
}

impl HeightInput {
    fn is_set(&self) -> bool {
        match self {
            Self::Cm { value } => *value > 0.0,
            Self::FtIn { feet, .. } => *feet > 0,
        }
    }

    fn to_cm(self) -> f64 {
        match self {
            Self::Cm { value } => value,
            Self::FtIn { feet, inches } => {
                f64::from(feet) * CM_PER_FOOT + f64::from(inches) * CM_PER_INCH
            }
        }
    }
}

/// Weight as entered, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum WeightInput {
    Kg { value: f64 },
    Lbs { value: f64 },
}

impl WeightInput {
    fn is_set(&self) -> bool {
        match self {
            Self::Kg { value } | Self::Lbs { value } => *value > 0.0,
        }
    }

    fn to_kg(self) -> f64 {
        match self {
            Self::Kg { value } => value,
            Self::Lbs { value } => value * KG_PER_LB,
        }
    }
}

/// Accumulated wizard answers. Purely in-memory until commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardDraft {
    // Step 1
    pub full_name: String,
    pub country: String,
    pub age: u32,
    pub height: Option<HeightInput>,
    pub weight: Option<WeightInput>,

    // Step 2
    pub has_physical_issues: TriState,
    pub physical_issues: Vec<String>,
    pub physical_issues_other: String,

    // Step 3
    pub fitness_goals: Vec<String>,

    // Step 4
    pub has_medical_conditions: TriState,
    pub medical_conditions: Vec<String>,
    pub medical_conditions_other: String,

    // Step 5
    pub has_mental_health: TriState,
    pub mental_health_conditions: Vec<String>,
    pub mental_health_other: String,
    pub mental_health_unsure: bool,

    // Step 6
    pub has_allergies: TriState,
    pub allergies: Vec<String>,
    pub allergies_other: String,

    // Step 7
    pub takes_supplements: TriState,
    pub supplements: Vec<String>,
    pub supplements_other: String,
}

/// Partial update applied to a draft. Every field optional so a client
/// can send only what changed on the current step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftUpdate {
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub age: Option<u32>,
    pub height: Option<HeightInput>,
    pub weight: Option<WeightInput>,

    pub has_physical_issues: Option<TriState>,
    pub physical_issues: Option<Vec<String>>,
    pub physical_issues_other: Option<String>,

    pub fitness_goals: Option<Vec<String>>,

    pub has_medical_conditions: Option<TriState>,
    pub medical_conditions: Option<Vec<String>>,
    pub medical_conditions_other: Option<String>,

    pub has_mental_health: Option<TriState>,
    pub mental_health_conditions: Option<Vec<String>>,
    pub mental_health_other: Option<String>,
    pub mental_health_unsure: Option<bool>,

    pub has_allergies: Option<TriState>,
    pub allergies: Option<Vec<String>>,
    pub allergies_other: Option<String>,

    pub takes_supplements: Option<TriState>,
    pub supplements: Option<Vec<String>>,
    pub supplements_other: Option<String>,
}

impl WizardDraft {
    /// Merge a partial update into the draft.
    ///
    /// Answering "no" on a gated step clears that step's tags; on the
    /// mental-health step, "yes"/"no" clears the unsure flag and
    /// setting unsure clears the yes/no answer and any selections. The
    /// exclusivity rules live here so every caller gets them.
    pub fn apply(&mut self, update: DraftUpdate) {
        if let Some(v) = update.full_name {
            self.full_name = v;
        }
        if let Some(v) = update.country {
            self.country = v;
        }
        if let Some(v) = update.age {
            self.age = v;
        }
        if let Some(v) = update.height {
            self.height = Some(v);
        }
        if let Some(v) = update.weight {
            self.weight = Some(v);
        }

        if let Some(v) = update.has_physical_issues {
            self.has_physical_issues = v;
            if v == TriState::No {
                self.physical_issues.clear();
            }
        }
        if let Some(v) = update.physical_issues {
            self.physical_issues = v;
        }
        if let Some(v) = update.physical_issues_other {
            self.physical_issues_other = v;
        }

        if let Some(v) = update.fitness_goals {
            self.fitness_goals = v;
        }

        if let Some(v) = update.has_medical_conditions {
            self.has_medical_conditions = v;
            if v == TriState::No {
                self.medical_conditions.clear();
            }
        }
        if let Some(v) = update.medical_conditions {
            self.medical_conditions = v;
        }
        if let Some(v) = update.medical_conditions_other {
            self.medical_conditions_other = v;
        }

        if let Some(v) = update.has_mental_health {
            self.has_mental_health = v;
            self.mental_health_unsure = false;
            if v == TriState::No {
                self.mental_health_conditions.clear();
            }
        }
        if let Some(true) = update.mental_health_unsure {
            self.mental_health_unsure = true;
            self.has_mental_health = TriState::Unset;
            self.mental_health_conditions.clear();
        }
        if let Some(false) = update.mental_health_unsure {
            self.mental_health_unsure = false;
        }
        if let Some(v) = update.mental_health_conditions {
            self.mental_health_conditions = v;
        }
        if let Some(v) = update.mental_health_other {
            self.mental_health_other = v;
        }

        if let Some(v) = update.has_allergies {
            self.has_allergies = v;
            if v == TriState::No {
                self.allergies.clear();
            }
        }
        if let Some(v) = update.allergies {
            self.allergies = v;
        }
        if let Some(v) = update.allergies_other {
            self.allergies_other = v;
        }

        if let Some(v) = update.takes_supplements {
            self.takes_supplements = v;
            if v == TriState::No {
                self.supplements.clear();
            }
        }
        if let Some(v) = update.supplements {
            self.supplements = v;
        }
        if let Some(v) = update.supplements_other {
            self.supplements_other = v;
        }
    }

    /// Whether the given step's gate predicate holds.
    pub fn can_proceed(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::PersonalInfo => {
                !self.full_name.trim().is_empty()
                    && !self.country.trim().is_empty()
                    && self.age > 0
                    && self.height.is_some_and(|h| h.is_set())
                    && self.weight.is_some_and(|w| w.is_set())
            }
            WizardStep::PhysicalHealth => {
                gated(self.has_physical_issues, &self.physical_issues)
            }
            WizardStep::FitnessGoals => !self.fitness_goals.is_empty(),
            WizardStep::MedicalConditions => {
                gated(self.has_medical_conditions, &self.medical_conditions)
            }
            WizardStep::MentalHealth => {
                self.mental_health_unsure
                    || gated(self.has_mental_health, &self.mental_health_conditions)
            }
            WizardStep::Allergies => gated(self.has_allergies, &self.allergies),
            WizardStep::Supplements => gated(self.takes_supplements, &self.supplements),
        }
    }

    /// First human-readable reason the step is blocked, for error bodies.
    pub fn blocking_reason(&self, step: WizardStep) -> &'static str {
        match step {
            WizardStep::PersonalInfo => "name, country, age, height and weight are required",
            WizardStep::FitnessGoals => "select at least one goal",
            WizardStep::MentalHealth => {
                "answer the question, select a condition, or mark not sure"
            }
            _ => "answer the question, and select at least one item if yes",
        }
    }

    /// Collapse the draft into a committed profile. Unit conversions
    /// happen here and only here; raw inputs never leave the draft.
    pub fn build_profile(&self) -> UserProfile {
        let mut physical_medical = tags_with_other(&self.physical_issues, &self.physical_issues_other);
        physical_medical.extend(tags_with_other(
            &self.medical_conditions,
            &self.medical_conditions_other,
        ));

        UserProfile {
            age: self.age,
            height_cm: self.height.map(HeightInput::to_cm).unwrap_or_default(),
            weight_kg: self.weight.map(WeightInput::to_kg).unwrap_or_default(),
            physical_medical_issues: physical_medical,
            mental_health_challenges: tags_with_other(
                &self.mental_health_conditions,
                &self.mental_health_other,
            ),
            allergies: tags_with_other(&self.allergies, &self.allergies_other),
            physical_limitations: non_empty_or(&self.physical_issues, NO_LIMITATIONS),
            dietary_restrictions: non_empty_or(&self.allergies, NO_RESTRICTIONS),
            fitness_level: FitnessLevel::Beginner,
            goals: self.fitness_goals.clone(),
            preferred_exercise_types: vec!["Walking/Light cardio".to_string()],
        }
    }
}

fn gated(answer: TriState, tags: &[String]) -> bool {
    answer.is_answered() && (answer == TriState::No || !tags.is_empty())
}

/// Replace the `other` tag with its free-text value, if any.
fn tags_with_other(tags: &[String], other: &str) -> Vec<String> {
    let mut out: Vec<String> = tags.iter().filter(|t| *t != OTHER_TAG).cloned().collect();
    if !other.trim().is_empty() {
        out.push(other.trim().to_string());
    }
    out
}

fn non_empty_or(tags: &[String], fallback: &str) -> Vec<String> {
    if tags.is_empty() {
        vec![fallback.to_string()]
    } else {
        tags.to_vec()
    }
}
