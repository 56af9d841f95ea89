//! In-memory store backend — used by tests and database-free wiring.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::onboarding::state::OnboardingRecord;

use super::traits::{
    CalendarEvent, CalendarStore, OnboardingStore, PreferencesStore, UserPreferences,
};

/// In-memory implementation of all store traits.
///
/// Onboarding records are lazily initialized: unknown users read as a fresh
/// NOT_STARTED record, matching the "created implicitly at user creation"
/// contract. Each `commit` replaces the whole record under the write lock.
#[derive(Default)]
pub struct MemoryStore {
    onboarding: RwLock<HashMap<Uuid, OnboardingRecord>>,
    preferences: RwLock<HashMap<Uuid, UserPreferences>>,
    events: RwLock<Vec<CalendarEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed preferences for a user.
    pub async fn put_preferences(&self, prefs: UserPreferences) {
        self.preferences.write().await.insert(prefs.user_id, prefs);
    }

    /// Seed a calendar event.
    pub async fn put_event(&self, event: CalendarEvent) {
        self.events.write().await.push(event);
    }
}

#[async_trait]
impl OnboardingStore for MemoryStore {
    async fn load(&self, user_id: Uuid) -> Result<OnboardingRecord, StoreError> {
        Ok(self
            .onboarding
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn commit(&self, user_id: Uuid, record: &OnboardingRecord) -> Result<(), StoreError> {
        self.onboarding.write().await.insert(user_id, record.clone());
        Ok(())
    }
}

#[async_trait]
impl PreferencesStore for MemoryStore {
    async fn get_preferences(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, StoreError> {
        Ok(self.preferences.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn events_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        let events = self.events.read().await;
        let mut matching: Vec<CalendarEvent> = events
            .iter()
            .filter(|e| e.user_id == user_id && e.start_time >= start && e.start_time <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.start_time);
        matching.truncate(limit);
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::state::OnboardingStatus;
    use chrono::Duration;

    #[tokio::test]
    async fn onboarding_load_defaults_and_commit_roundtrips() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let record = store.load(user).await.unwrap();
        assert_eq!(record.status, OnboardingStatus::NotStarted);

        let mut next = record.clone();
        next.status = OnboardingStatus::InProgress;
        store.commit(user, &next).await.unwrap();

        let reloaded = store.load(user).await.unwrap();
        assert_eq!(reloaded.status, OnboardingStatus::InProgress);
    }

    #[tokio::test]
    async fn preferences_roundtrip() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(store.get_preferences(user).await.unwrap().is_none());

        store
            .put_preferences(UserPreferences {
                user_id: user,
                timezone: "America/Sao_Paulo".to_string(),
                language: "pt-BR".to_string(),
                communication_style: None,
                morning_checkin_time: None,
                evening_checkin_time: None,
                coach_name: None,
            })
            .await;

        let prefs = store.get_preferences(user).await.unwrap().unwrap();
        assert_eq!(prefs.timezone, "America/Sao_Paulo");
    }

    #[tokio::test]
    async fn events_filtered_sorted_and_limited() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let now = Utc::now();

        for offset in [3, 1, 2, 20] {
            store
                .put_event(CalendarEvent {
                    id: Uuid::new_v4(),
                    user_id: user,
                    title: format!("event+{offset}d"),
                    description: None,
                    start_time: now + Duration::days(offset),
                    end_time: None,
                    location: None,
                    external_id: None,
                    is_all_day: false,
                })
                .await;
        }
        // Another user's event must not leak in
        store
            .put_event(CalendarEvent {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "other".to_string(),
                description: None,
                start_time: now + Duration::days(1),
                end_time: None,
                location: None,
                external_id: None,
                is_all_day: false,
            })
            .await;

        let events = store
            .events_between(user, now, now + Duration::days(7), 2)
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "event+1d");
        assert_eq!(events[1].title, "event+2d");
    }
}
