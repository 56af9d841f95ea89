//! User context collaborator — a durable-state snapshot for one user.
//!
//! The orchestrator asks a `ContextProvider` for a snapshot before routing.
//! Context enrichment is best-effort: on any failure the orchestrator falls
//! back to `UserContext::minimal` and keeps going.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContextError;

/// Snapshot of durable user state used for routing and prompting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Uuid,
    /// IANA timezone name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Free-form profile data (preferences, integrations, goals).
    #[serde(default)]
    pub profile: serde_json::Value,
}

impl UserContext {
    /// The degraded context used when the provider fails: just the user id.
    pub fn minimal(user_id: Uuid) -> Self {
        Self {
            user_id,
            timezone: None,
            profile: serde_json::Value::Null,
        }
    }

    /// Timezone to use for time-sensitive skills, defaulting to UTC.
    pub fn timezone_or_utc(&self) -> &str {
        self.timezone.as_deref().unwrap_or("UTC")
    }
}

/// Collaborator that assembles a [`UserContext`] from durable storage.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn build_context(&self, user_id: Uuid) -> Result<UserContext, ContextError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_context_has_only_user_id() {
        let id = Uuid::new_v4();
        let ctx = UserContext::minimal(id);
        assert_eq!(ctx.user_id, id);
        assert!(ctx.timezone.is_none());
        assert_eq!(ctx.timezone_or_utc(), "UTC");
        assert!(ctx.profile.is_null());
    }

    #[test]
    fn context_serde_roundtrip() {
        let ctx = UserContext {
            user_id: Uuid::new_v4(),
            timezone: Some("America/Sao_Paulo".to_string()),
            profile: serde_json::json!({"language": "pt-BR"}),
        };
        let json = serde_json::to_string(&ctx).unwrap();
        let parsed: UserContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.user_id, ctx.user_id);
        assert_eq!(parsed.timezone_or_utc(), "America/Sao_Paulo");
        assert_eq!(parsed.profile["language"], "pt-BR");
    }
}
