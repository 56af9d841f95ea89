//! The routing decision for one message.

use serde::{Deserialize, Serialize};

/// What the orchestrator decided to do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Respond directly without invoking a skill.
    DirectResponse,
    /// Invoke a skill.
    SkillCall,
}

/// An immutable per-message routing decision. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Skill to invoke; present iff `kind` is `SkillCall`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
    /// Arguments for the skill call.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub skill_args: serde_json::Map<String, serde_json::Value>,
    /// Diagnostic-only explanation of the decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Action {
    /// A direct-response decision.
    pub fn direct(reasoning: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::DirectResponse,
            skill_name: None,
            skill_args: serde_json::Map::new(),
            reasoning: Some(reasoning.into()),
        }
    }

    /// A skill-call decision.
    pub fn skill_call(
        name: impl Into<String>,
        args: serde_json::Value,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::SkillCall,
            skill_name: Some(name.into()),
            skill_args: args.as_object().cloned().unwrap_or_default(),
            reasoning: Some(reasoning.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_fields() {
        let direct = Action::direct("no matching skill");
        assert_eq!(direct.kind, ActionKind::DirectResponse);
        assert!(direct.skill_name.is_none());

        let call = Action::skill_call(
            "get_current_date",
            serde_json::json!({"timezone": "UTC"}),
            "time keywords",
        );
        assert_eq!(call.kind, ActionKind::SkillCall);
        assert_eq!(call.skill_name.as_deref(), Some("get_current_date"));
        assert_eq!(call.skill_args["timezone"], "UTC");
    }

    #[test]
    fn action_serde_roundtrip() {
        let call = Action::skill_call("get_calendar_events", serde_json::json!({"days_ahead": 7}), "calendar");
        let json = serde_json::to_string(&call).unwrap();
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, ActionKind::SkillCall);
        assert_eq!(parsed.skill_args["days_ahead"], 7);
    }
}
