//! The routing seam: `(message, context) -> Action`.
//!
//! The default policy is ordered keyword matching. Swapping in an LLM-based
//! router only means providing another `Router` implementation; nothing
//! else in the pipeline changes.

use crate::config::OrchestratorConfig;
use crate::context::UserContext;

use super::action::Action;

/// Decides what to do with a message. Implementations must be deterministic
/// or at least side-effect free; execution happens elsewhere.
pub trait Router: Send + Sync {
    fn decide(&self, message: &str, context: &UserContext) -> Action;
}

/// Keyword categories checked in order; first match wins.
/// The order (time → preferences → calendar → direct) is part of the
/// routing contract.
const TIME_KEYWORDS: &[&str] = &["time", "date", "hora", "data", "quando"];
const PREFERENCES_KEYWORDS: &[&str] = &["preferences", "preferências", "settings", "configurações"];
const CALENDAR_KEYWORDS: &[&str] = &["calendar", "calendário", "events", "eventos", "agenda"];

/// Deterministic keyword-based router.
pub struct KeywordRouter {
    calendar_days_ahead: i64,
    calendar_event_limit: usize,
}

impl KeywordRouter {
    pub fn new(config: &OrchestratorConfig) -> Self {
        Self {
            calendar_days_ahead: config.calendar_days_ahead,
            calendar_event_limit: config.calendar_event_limit,
        }
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new(&OrchestratorConfig::default())
    }
}

fn matches_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

impl Router for KeywordRouter {
    fn decide(&self, message: &str, context: &UserContext) -> Action {
        let lower = message.to_lowercase();

        if matches_any(&lower, TIME_KEYWORDS) {
            Action::skill_call(
                "get_current_date",
                serde_json::json!({ "timezone": context.timezone_or_utc() }),
                "User asked about time/date",
            )
        } else if matches_any(&lower, PREFERENCES_KEYWORDS) {
            Action::skill_call(
                "get_user_preferences",
                serde_json::json!({ "user_id": context.user_id.to_string() }),
                "User asked about preferences",
            )
        } else if matches_any(&lower, CALENDAR_KEYWORDS) {
            Action::skill_call(
                "get_calendar_events",
                serde_json::json!({
                    "user_id": context.user_id.to_string(),
                    "days_ahead": self.calendar_days_ahead,
                    "limit": self.calendar_event_limit,
                }),
                "User asked about calendar",
            )
        } else {
            Action::direct("No matching skill, direct response")
        }
    }
}
