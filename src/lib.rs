//! Virtus core — the decision and execution layer of the assistant.
//!
//! Everything here is transport-agnostic: the orchestrator takes a user
//! message and returns reply text, the skill registry/executor run typed
//! capabilities behind a JSON argument surface, and the onboarding engine
//! drives a short fixed-sequence intake conversation. Outer layers (HTTP,
//! messaging channels, real LLM clients, real databases) plug in through
//! the collaborator traits: [`llm::LlmProvider`], [`context::ContextProvider`],
//! and the stores in [`store::traits`].

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod onboarding;
pub mod skills;
pub mod store;

pub use agent::{KeywordRouter, Orchestrator, Router};
pub use config::{OnboardingConfig, OrchestratorConfig};
pub use error::{Error, Result};
pub use skills::{SkillExecutor, SkillRegistry};
