//! Linear step machine driving the wizard.

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;
use crate::onboarding::draft::{DraftUpdate, WizardDraft};
use crate::onboarding::model::UserProfile;

/// Number of wizard steps.
pub const TOTAL_STEPS: u8 = 7;

/// The seven intake steps, in order. Navigation moves exactly one step
/// per action; there is no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    PhysicalHealth,
    FitnessGoals,
    MedicalConditions,
    MentalHealth,
    Allergies,
    Supplements,
}

impl WizardStep {
    pub fn first() -> Self {
        Self::PersonalInfo
    }

    /// 1-based position, for progress display.
    pub fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::PhysicalHealth => 2,
            Self::FitnessGoals => 3,
            Self::MedicalConditions => 4,
            Self::MentalHealth => 5,
            Self::Allergies => 6,
            Self::Supplements => 7,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::PhysicalHealth),
            Self::PhysicalHealth => Some(Self::FitnessGoals),
            Self::FitnessGoals => Some(Self::MedicalConditions),
            Self::MedicalConditions => Some(Self::MentalHealth),
            Self::MentalHealth => Some(Self::Allergies),
            Self::Allergies => Some(Self::Supplements),
            Self::Supplements => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => None,
            Self::PhysicalHealth => Some(Self::PersonalInfo),
            Self::FitnessGoals => Some(Self::PhysicalHealth),
            Self::MedicalConditions => Some(Self::FitnessGoals),
            Self::MentalHealth => Some(Self::MedicalConditions),
            Self::Allergies => Some(Self::MentalHealth),
            Self::Supplements => Some(Self::Allergies),
        }
    }
}

/// Result of a forward navigation.
#[derive(Debug)]
pub enum StepOutcome {
    /// Moved to the next step.
    Advanced(WizardStep),
    /// The last step's gate passed; the draft collapsed into a profile
    /// ready to commit. The display name travels with it because the
    /// wizard can correct the signup name.
    Completed {
        display_name: String,
        profile: Box<UserProfile>,
    },
}

/// One user's wizard in progress: current step plus the draft.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: WizardStep,
    draft: WizardDraft,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::first(),
            draft: WizardDraft::default(),
        }
    }

    /// Start with the signup name pre-filled.
    pub fn with_name(display_name: &str) -> Self {
        let mut state = Self::new();
        state.draft.full_name = display_name.to_string();
        state
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn update(&mut self, update: DraftUpdate) {
        self.draft.apply(update);
    }

    /// Move forward one step, or finish from the last step.
    ///
    /// Fails with `StepIncomplete` when the current step's gate
    /// predicate is false; the state is unchanged in that case.
    pub fn advance(&mut self) -> Result<StepOutcome, OnboardingError> {
        let current = self.step;
        if !self.draft.can_proceed(current) {
            return Err(OnboardingError::StepIncomplete {
                step: current.number(),
                reason: self.draft.blocking_reason(current).to_string(),
            });
        }
        match current.next() {
            Some(next) => {
                self.step = next;
                Ok(StepOutcome::Advanced(next))
            }
            None => Ok(StepOutcome::Completed {
                display_name: self.draft.full_name.trim().to_string(),
                profile: Box::new(self.draft.build_profile()),
            }),
        }
    }

    /// Move back one step. Always permitted; a no-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::draft::{HeightInput, TriState, WeightInput};

    fn complete_draft_update() -> DraftUpdate {
        DraftUpdate {
            full_name: Some("Alice Smith".into()),
            country: Some("Canada".into()),
            age: Some(34),
            height: Some(HeightInput::Cm { value: 170.0 }),
            weight: Some(WeightInput::Kg { value: 68.0 }),
            has_physical_issues: Some(TriState::No),
            fitness_goals: Some(vec!["general".into()]),
            has_medical_conditions: Some(TriState::No),
            has_mental_health: Some(TriState::No),
            has_allergies: Some(TriState::No),
            takes_supplements: Some(TriState::No),
            ..Default::default()
        }
    }

    #[test]
    fn advance_blocks_until_gate_passes() {
        let mut wizard = WizardState::new();
        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, OnboardingError::StepIncomplete { step: 1, .. }));
        assert_eq!(wizard.step(), WizardStep::PersonalInfo);

        wizard.update(complete_draft_update());
        match wizard.advance().unwrap() {
            StepOutcome::Advanced(step) => assert_eq!(step, WizardStep::PhysicalHealth),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn full_walk_finishes_with_a_profile() {
        let mut wizard = WizardState::new();
        wizard.update(complete_draft_update());

        for _ in 0..6 {
            assert!(matches!(wizard.advance().unwrap(), StepOutcome::Advanced(_)));
        }
        assert_eq!(wizard.step(), WizardStep::Supplements);

        match wizard.advance().unwrap() {
            StepOutcome::Completed { display_name, profile } => {
                assert_eq!(display_name, "Alice Smith");
                assert_eq!(profile.age, 34);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn back_is_always_permitted() {
        let mut wizard = WizardState::new();
        assert_eq!(wizard.back(), WizardStep::PersonalInfo);

        wizard.update(complete_draft_update());
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::PhysicalHealth);
        assert_eq!(wizard.back(), WizardStep::PersonalInfo);
    }

    #[test]
    fn step_numbers_are_one_based() {
        assert_eq!(WizardStep::PersonalInfo.number(), 1);
        assert_eq!(WizardStep::Supplements.number(), 7);
        assert_eq!(TOTAL_STEPS, 7);
    }
}
