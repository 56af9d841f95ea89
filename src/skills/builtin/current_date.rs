//! Current date/time skill.

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;

use crate::error::SkillError;
use crate::skills::skill::{Skill, SkillResult};

/// Returns the current date and time, optionally in a specific timezone.
///
/// An unrecognized timezone falls back to UTC; the payload reports the
/// timezone actually used.
pub struct GetCurrentDateSkill;

#[async_trait]
impl Skill for GetCurrentDateSkill {
    fn name(&self) -> &str {
        "get_current_date"
    }

    fn description(&self) -> &str {
        "Get the current date and time, optionally in a specific timezone"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "timezone": {
                    "type": "string",
                    "description": "Timezone name (e.g., 'UTC', 'America/New_York', 'Europe/London')",
                    "default": "UTC",
                },
                "format": {
                    "type": "string",
                    "description": "Output format: 'iso' for ISO 8601 or 'human' for readable format",
                    "enum": ["iso", "human"],
                    "default": "iso",
                },
            },
            "required": [],
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<SkillResult, SkillError> {
        let requested = args
            .get("timezone")
            .and_then(|v| v.as_str())
            .unwrap_or("UTC");
        let output_format = args.get("format").and_then(|v| v.as_str()).unwrap_or("iso");

        let (tz, timezone_used) = match requested.parse::<Tz>() {
            Ok(tz) => (tz, requested.to_string()),
            Err(_) => (Tz::UTC, "UTC".to_string()),
        };

        let now = Utc::now().with_timezone(&tz);
        let formatted = if output_format == "human" {
            now.format("%A, %B %d, %Y at %I:%M %p %Z").to_string()
        } else {
            now.to_rfc3339()
        };

        Ok(SkillResult::ok(serde_json::json!({
            "datetime": formatted,
            "timestamp": now.timestamp(),
            "timezone": timezone_used,
            "iso_format": now.to_rfc3339(),
            "date": now.format("%Y-%m-%d").to_string(),
            "time": now.format("%H:%M:%S").to_string(),
            "day_of_week": now.format("%A").to_string(),
        })))
    }
}
