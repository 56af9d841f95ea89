//! The `onboarding_short` skill — exposes the engine through the skill
//! dispatch layer.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SkillError;
use crate::skills::skill::{Skill, SkillResult, require_str};
use crate::store::traits::OnboardingStore;

use super::engine::OnboardingEngine;

/// Skill-shaped wrapper that drives the onboarding flow.
///
/// Actions: `start`, `process_response`, `get_status`. The skill validates
/// its own arguments and reports every outcome as a `SkillResult`, so a bad
/// request never escapes as an error.
pub struct OnboardingSkill {
    engine: OnboardingEngine,
}

impl OnboardingSkill {
    pub fn new(store: Arc<dyn OnboardingStore>) -> Self {
        Self {
            engine: OnboardingEngine::new(store),
        }
    }

    async fn handle_start(&self, user_id: Uuid) -> SkillResult {
        match self.engine.start(user_id).await {
            // Starting an IN_PROGRESS session resumes it, so the payload has
            // to reflect the step the user is actually on.
            Ok(status) => SkillResult::ok(serde_json::json!({
                "status": status.status,
                "current_step": status.current_step,
                "message": status.current_prompt,
                "next_step": status.current_step.and_then(|s| s.next()),
            })),
            Err(e) => SkillResult::fail(e.to_string()),
        }
    }

    async fn handle_process_response(&self, user_id: Uuid, response: &str) -> SkillResult {
        match self.engine.process_response(user_id, response).await {
            Ok(outcome) => SkillResult::ok(serde_json::json!({
                "is_valid": outcome.is_valid,
                "validation_error": outcome.validation_error,
                "current_step": outcome.current_step,
                "next_step": outcome.next_step,
                "next_message": outcome.next_prompt,
                "extracted_data": outcome.extracted_data,
                "completed": outcome.completed,
            })),
            Err(e) => SkillResult::fail(e.to_string()),
        }
    }

    async fn handle_get_status(&self, user_id: Uuid) -> SkillResult {
        match self.engine.get_status(user_id).await {
            Ok(status) => SkillResult::ok(serde_json::json!({
                "status": status.status,
                "current_step": status.current_step,
                "progress_percent": status.progress_percent,
                "started_at": status.started_at,
                "completed_at": status.completed_at,
                "current_message": status.current_prompt,
            })),
            Err(e) => SkillResult::fail(e.to_string()),
        }
    }
}

#[async_trait]
impl Skill for OnboardingSkill {
    fn name(&self) -> &str {
        "onboarding_short"
    }

    fn description(&self) -> &str {
        "Guides user through short onboarding flow to collect name, goals, and preferences"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "UUID of the user",
                },
                "action": {
                    "type": "string",
                    "enum": ["start", "process_response", "get_status"],
                    "description": "Action to perform",
                },
                "user_response": {
                    "type": "string",
                    "description": "User's response to current step (for process_response)",
                },
            },
            "required": ["user_id", "action"],
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<SkillResult, SkillError> {
        let Ok(user_id_str) = require_str(&args, "user_id") else {
            return Ok(SkillResult::fail("Missing required field: user_id"));
        };
        let Ok(action) = require_str(&args, "action") else {
            return Ok(SkillResult::fail("Missing required field: action"));
        };
        let Ok(user_id) = user_id_str.parse::<Uuid>() else {
            return Ok(SkillResult::fail(format!(
                "Invalid UUID format: {user_id_str}"
            )));
        };

        let result = match action {
            "start" => self.handle_start(user_id).await,
            "process_response" => {
                let response = args
                    .get("user_response")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                self.handle_process_response(user_id, response).await
            }
            "get_status" => self.handle_get_status(user_id).await,
            other => SkillResult::fail(format!("Unknown action: {other}")),
        };
        Ok(result)
    }
}
