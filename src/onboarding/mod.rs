//! Guided onboarding — a fixed-sequence conversation that collects a new
//! user's name, goals, and preferences.
//!
//! The flow is a linear state machine (welcome → name → goals → preferences
//! → conclusion → completed) driven by [`engine::OnboardingEngine`] against
//! a persistence collaborator, and exposed to the dispatch layer as the
//! `onboarding_short` skill.

pub mod engine;
pub mod skill;
pub mod state;
pub mod steps;
pub mod validators;

pub use engine::{OnboardingEngine, ProcessOutcome, StatusSnapshot};
pub use skill::OnboardingSkill;
pub use state::{HistoryEntry, OnboardingRecord, OnboardingStatus};
pub use steps::OnboardingStep;
