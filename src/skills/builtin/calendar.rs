//! Calendar events lookup skill.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::SkillError;
use crate::skills::skill::{Skill, SkillResult, require_str};
use crate::store::traits::CalendarStore;

const DEFAULT_DAYS_AHEAD: i64 = 7;
const DEFAULT_LIMIT: usize = 50;

/// Retrieves upcoming calendar events for a user within a lookahead window.
pub struct GetCalendarEventsSkill {
    store: Arc<dyn CalendarStore>,
}

impl GetCalendarEventsSkill {
    pub fn new(store: Arc<dyn CalendarStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Skill for GetCalendarEventsSkill {
    fn name(&self) -> &str {
        "get_calendar_events"
    }

    fn description(&self) -> &str {
        "Get upcoming calendar events for a user within a specified date range"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "UUID of the user",
                },
                "days_ahead": {
                    "type": "integer",
                    "description": "Number of days ahead to fetch events",
                    "default": DEFAULT_DAYS_AHEAD,
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of events to return",
                    "default": DEFAULT_LIMIT,
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

        let days_ahead = args
            .get("days_ahead")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_DAYS_AHEAD);
        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT);

        let start = Utc::now();
        let end = start + Duration::days(days_ahead);
        let events = self.store.events_between(user_id, start, end, limit).await?;

        let events_data: Vec<serde_json::Value> = events
            .iter()
            .map(|event| {
                serde_json::json!({
                    "id": event.id,
                    "title": event.title,
                    "description": event.description,
                    "start_time": event.start_time,
                    "end_time": event.end_time,
                    "location": event.location,
                    "external_id": event.external_id,
                    "is_all_day": event.is_all_day,
                })
            })
            .collect();

        Ok(SkillResult::ok(serde_json::json!({
            "count": events_data.len(),
            "events": events_data,
            "start_date": start,
            "end_date": end,
        })))
    }
}
