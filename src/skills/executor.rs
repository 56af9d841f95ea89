//! Skill executor — looks skills up and runs them behind a uniform boundary.
//!
//! The executor is the last line of defense: a misbehaving skill never
//! propagates an error past it. The one condition it does surface is
//! `SkillError::NotFound`, which callers can distinguish from a skill's own
//! internal failure.

use std::sync::Arc;

use crate::error::SkillError;
use crate::skills::registry::SkillRegistry;
use crate::skills::skill::SkillResult;

/// Executes skills from a registry with uniform error folding and logging.
pub struct SkillExecutor {
    registry: Arc<SkillRegistry>,
}

impl SkillExecutor {
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self { registry }
    }

    /// Execute a skill by name.
    ///
    /// Returns `Err(SkillError::NotFound)` when the name is unknown. Any
    /// error raised by the skill itself is caught and converted into a
    /// failure `SkillResult` with `error = "<kind>: <message>"`.
    pub async fn execute(
        &self,
        skill_name: &str,
        args: serde_json::Value,
    ) -> Result<SkillResult, SkillError> {
        let Some(skill) = self.registry.get(skill_name).await else {
            tracing::error!(skill = %skill_name, "Skill not found in registry");
            return Err(SkillError::NotFound {
                name: skill_name.to_string(),
            });
        };

        tracing::info!(skill = %skill_name, args = %args, "Executing skill");
        match skill.execute(args).await {
            Ok(result) => {
                tracing::info!(
                    skill = %skill_name,
                    success = result.success,
                    "Skill completed"
                );
                Ok(result)
            }
            Err(e) => {
                let error_msg = format!("{}: {}", e.kind(), e);
                tracing::error!(skill = %skill_name, error = %error_msg, "Skill failed");
                Ok(SkillResult::fail(error_msg))
            }
        }
    }

    /// Execute a skill, treating "not found" as a soft failure.
    ///
    /// Never returns `Err`: an unknown skill yields a failure result with
    /// `fallback_message` (or a default) as the error text.
    pub async fn execute_with_fallback(
        &self,
        skill_name: &str,
        args: serde_json::Value,
        fallback_message: Option<String>,
    ) -> SkillResult {
        match self.execute(skill_name, args).await {
            Ok(result) => result,
            Err(e) => {
                let message = fallback_message
                    .unwrap_or_else(|| format!("Skill '{}' is not available", skill_name));
                tracing::warn!(skill = %skill_name, reason = %e, "Using fallback");
                SkillResult::fail(message)
            }
        }
    }
}
