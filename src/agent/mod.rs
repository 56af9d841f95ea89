//! Orchestration — routes each message to a skill call or a direct reply.

pub mod action;
pub mod orchestrator;
pub mod router;

pub use action::{Action, ActionKind};
pub use orchestrator::Orchestrator;
pub use router::{KeywordRouter, Router};
