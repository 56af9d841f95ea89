//! Skill abstraction — named, independently executable capabilities.

pub mod builtin;
pub mod executor;
pub mod registry;
pub mod skill;

pub use executor::SkillExecutor;
pub use registry::{SkillInfo, SkillRegistry};
pub use skill::{ParameterKind, Skill, SkillParameter, SkillResult, require_str};
