//! Persisted onboarding state for one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::steps::OnboardingStep;

/// Lifecycle status of an onboarding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for OnboardingStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl std::fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// One raw user response, kept for auditing the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: OnboardingStep,
    pub timestamp: DateTime<Utc>,
    pub response: String,
}

/// The onboarding record the persistence collaborator holds per user.
///
/// Every transition is read-current → compute-next → commit-whole-record;
/// the store's `commit` is the atomicity boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub status: OnboardingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<OnboardingStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Accumulated extracted fields (name, goals, preferences…).
    #[serde(default)]
    pub collected: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl OnboardingRecord {
    /// Derived progress percentage: the per-step table, or 100 when done.
    pub fn progress_percent(&self) -> u8 {
        match self.status {
            OnboardingStatus::Completed => 100,
            _ => self
                .current_step
                .map(|s| s.progress_percent())
                .unwrap_or(0),
        }
    }

    /// Merge a partial data mapping into the collected container.
    pub fn merge_collected(&mut self, data: &serde_json::Value) {
        if let Some(obj) = data.as_object() {
            for (k, v) in obj {
                self.collected.insert(k.clone(), v.clone());
            }
        }
    }

    /// Clear everything back to a fresh NOT_STARTED record.
    pub fn clear(&mut self) {
        *self = OnboardingRecord::default();
    }
}
