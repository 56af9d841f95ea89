//! Backend-agnostic persistence traits the core depends on.
//!
//! Implementations (SQL, remote, in-memory) are collaborators; the core
//! only needs these interfaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::onboarding::state::OnboardingRecord;

/// A user's stored preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub timezone: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<String>,
    /// "HH:MM" local time, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning_checkin_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_checkin_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_name: Option<String>,
}

/// A stored calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
}

/// Onboarding persistence, keyed by user id.
///
/// `commit` must replace the whole record atomically (one transactional
/// update) so a double-submitting user cannot produce a lost update.
#[async_trait]
pub trait OnboardingStore: Send + Sync {
    /// Read the user's current record. Implementations may lazily
    /// initialize a NOT_STARTED record for users they know about.
    async fn load(&self, user_id: Uuid) -> Result<OnboardingRecord, StoreError>;

    /// Atomically persist the next record.
    async fn commit(&self, user_id: Uuid, record: &OnboardingRecord) -> Result<(), StoreError>;
}

/// Preferences lookup used by the `get_user_preferences` skill.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn get_preferences(&self, user_id: Uuid)
    -> Result<Option<UserPreferences>, StoreError>;
}

/// Calendar lookup used by the `get_calendar_events` skill.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Events for `user_id` with `start_time` inside `[start, end]`,
    /// ordered by start time, at most `limit` of them.
    async fn events_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CalendarEvent>, StoreError>;
}
