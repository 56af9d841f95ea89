//! User preferences lookup skill.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SkillError;
use crate::skills::skill::{Skill, SkillResult, require_str};
use crate::store::traits::PreferencesStore;

/// Retrieves the stored preferences for a user.
pub struct GetUserPreferencesSkill {
    store: Arc<dyn PreferencesStore>,
}

impl GetUserPreferencesSkill {
    pub fn new(store: Arc<dyn PreferencesStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Skill for GetUserPreferencesSkill {
    fn name(&self) -> &str {
        "get_user_preferences"
    }

    fn description(&self) -> &str {
        "Get the preferences for a specific user including timezone, language, \
         communication style, and check-in settings"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "UUID of the user",
                },
            },
            "required": ["user_id"],
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<SkillResult, SkillError> {
        let user_id_str = match require_str(&args, "user_id") {
            Ok(s) => s,
            Err(_) => return Ok(SkillResult::fail("Missing required field: user_id")),
        };
        let user_id = match user_id_str.parse::<Uuid>() {
            Ok(id) => id,
            Err(_) => {
                return Ok(SkillResult::fail(format!(
                    "Invalid UUID format: {user_id_str}"
                )));
            }
        };

        let prefs = self.store.get_preferences(user_id).await?;
        let Some(prefs) = prefs else {
            return Ok(SkillResult::fail(format!(
                "User preferences not found for user_id: {user_id}"
            )));
        };

        Ok(SkillResult::ok(serde_json::json!({
            "user_id": prefs.user_id,
            "timezone": prefs.timezone,
            "language": prefs.language,
            "communication_style": prefs.communication_style,
            "morning_checkin_time": prefs.morning_checkin_time,
            "evening_checkin_time": prefs.evening_checkin_time,
            "coach_name": prefs.coach_name,
        })))
    }
}
