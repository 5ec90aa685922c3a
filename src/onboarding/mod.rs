//! Seven-step profile intake wizard.
//!
//! The wizard is single-shot and in-memory: a draft accumulates answers
//! step by step and nothing touches the store until the final step
//! commits. Abandoning the wizard drops the draft.

pub mod draft;
pub mod model;
pub mod state;

pub use draft::{DraftUpdate, HeightInput, TriState, WeightInput, WizardDraft};
pub use model::{FitnessLevel, UserProfile};
pub use state::{StepOutcome, WizardState, WizardStep};
