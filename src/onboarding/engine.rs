//! Onboarding engine — drives the step state machine against the store.
//!
//! Every transition is one `load` → compute → `commit`, so the store's
//! atomic `commit` is what protects concurrent double-submits from losing
//! updates.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::config::OnboardingConfig;
use crate::error::OnboardingError;
use crate::store::traits::OnboardingStore;

use super::state::{HistoryEntry, OnboardingRecord, OnboardingStatus};
use super::steps::OnboardingStep;
use super::validators::{extract_step, validate_step};

/// Read-only view of a user's onboarding state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusSnapshot {
    pub status: OnboardingStatus,
    pub current_step: Option<OnboardingStep>,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Prompt for the current step, when one is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_prompt: Option<String>,
    pub collected: serde_json::Map<String, serde_json::Value>,
}

impl StatusSnapshot {
    fn of(record: &OnboardingRecord) -> Self {
        Self {
            status: record.status,
            current_step: record.current_step,
            progress_percent: record.progress_percent(),
            started_at: record.started_at,
            completed_at: record.completed_at,
            current_prompt: record.current_step.map(|s| s.prompt().to_string()),
            collected: record.collected.clone(),
        }
    }
}

/// Result of processing one response.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProcessOutcome {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
    /// The step the response was processed against.
    pub current_step: OnboardingStep,
    /// The step the user advanced to, absent when onboarding completed
    /// (or when validation failed and the step re-prompts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<OnboardingStep>,
    /// Prompt to show next: the successor's prompt, or the same step's
    /// prompt again after a validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<serde_json::Value>,
    pub completed: bool,
}

/// The onboarding state machine over a persistence collaborator.
pub struct OnboardingEngine {
    store: Arc<dyn OnboardingStore>,
    config: OnboardingConfig,
}

impl OnboardingEngine {
    pub fn new(store: Arc<dyn OnboardingStore>) -> Self {
        Self::with_config(store, OnboardingConfig::default())
    }

    pub fn with_config(store: Arc<dyn OnboardingStore>, config: OnboardingConfig) -> Self {
        Self { store, config }
    }

    /// Begin onboarding.
    ///
    /// NOT_STARTED moves to IN_PROGRESS at the welcome step. An IN_PROGRESS
    /// session is resumed as-is (idempotent). A COMPLETED session reports
    /// `AlreadyCompleted`.
    pub async fn start(&self, user_id: Uuid) -> Result<StatusSnapshot, OnboardingError> {
        let mut record = self.store.load(user_id).await?;

        match record.status {
            OnboardingStatus::Completed => Err(OnboardingError::AlreadyCompleted),
            OnboardingStatus::InProgress => Ok(StatusSnapshot::of(&record)),
            OnboardingStatus::NotStarted => {
                record.status = OnboardingStatus::InProgress;
                record.current_step = Some(OnboardingStep::Welcome);
                record.started_at = Some(Utc::now());
                record.completed_at = None;
                record.collected = serde_json::Map::new();
                record.history = Vec::new();
                self.store.commit(user_id, &record).await?;
                tracing::info!(%user_id, "Onboarding started");
                Ok(StatusSnapshot::of(&record))
            }
        }
    }

    /// Process the user's response to the current step.
    ///
    /// Invalid input leaves the state untouched and re-prompts the same
    /// step. Valid input extracts data (when the step declares it), records
    /// history, and advances; advancing past the last step completes the
    /// session.
    pub async fn process_response(
        &self,
        user_id: Uuid,
        response: &str,
    ) -> Result<ProcessOutcome, OnboardingError> {
        let mut record = self.store.load(user_id).await?;

        if record.status == OnboardingStatus::Completed {
            return Err(OnboardingError::AlreadyCompleted);
        }
        let Some(step) = record.current_step else {
            return Err(OnboardingError::NotStarted);
        };

        if step.requires_validation()
            && let Err(message) = validate_step(step, response)
        {
            tracing::debug!(%user_id, %step, "Validation failed");
            return Ok(ProcessOutcome {
                is_valid: false,
                validation_error: Some(message),
                current_step: step,
                next_step: None,
                next_prompt: Some(step.prompt().to_string()),
                extracted_data: None,
                completed: false,
            });
        }

        let extracted = if step.extracts_data() {
            let data = extract_step(step, response);
            if let Some(ref data) = data {
                record.merge_collected(data);
                record.history.push(HistoryEntry {
                    step,
                    timestamp: Utc::now(),
                    response: response.to_string(),
                });
            }
            data
        } else {
            None
        };

        let next_step = step.next();
        let completed = match next_step {
            Some(next) => {
                record.current_step = Some(next);
                false
            }
            None => {
                record.status = OnboardingStatus::Completed;
                record.current_step = None;
                record.completed_at = Some(Utc::now());
                true
            }
        };
        self.store.commit(user_id, &record).await?;

        let next_prompt = next_step.map(|next| self.personalized_prompt(next, &record));
        if completed {
            tracing::info!(%user_id, "Onboarding completed");
        }

        Ok(ProcessOutcome {
            is_valid: true,
            validation_error: None,
            current_step: step,
            next_step,
            next_prompt,
            extracted_data: extracted,
            completed,
        })
    }

    /// Pure read of the current state plus derived progress.
    pub async fn get_status(&self, user_id: Uuid) -> Result<StatusSnapshot, OnboardingError> {
        let record = self.store.load(user_id).await?;
        Ok(StatusSnapshot::of(&record))
    }

    /// Complete immediately from any non-COMPLETED state, bypassing the
    /// remaining steps and validation.
    pub async fn skip(&self, user_id: Uuid) -> Result<StatusSnapshot, OnboardingError> {
        let mut record = self.store.load(user_id).await?;
        if record.status == OnboardingStatus::Completed {
            return Err(OnboardingError::AlreadyCompleted);
        }
        record.status = OnboardingStatus::Completed;
        record.current_step = None;
        record.completed_at = Some(Utc::now());
        self.store.commit(user_id, &record).await?;
        tracing::info!(%user_id, "Onboarding skipped");
        Ok(StatusSnapshot::of(&record))
    }

    /// Reset back to NOT_STARTED from any state, clearing step, timestamps,
    /// and collected data.
    pub async fn reset(&self, user_id: Uuid) -> Result<StatusSnapshot, OnboardingError> {
        let mut record = self.store.load(user_id).await?;
        record.clear();
        self.store.commit(user_id, &record).await?;
        tracing::info!(%user_id, "Onboarding reset");
        Ok(StatusSnapshot::of(&record))
    }

    /// Reset an IN_PROGRESS session that has been idle longer than the
    /// configured `idle_timeout_days`. Returns whether a reset occurred.
    /// COMPLETED and NOT_STARTED sessions are never touched.
    pub async fn check_idle_timeout(&self, user_id: Uuid) -> Result<bool, OnboardingError> {
        let max_days = self.config.idle_timeout_days;
        let record = self.store.load(user_id).await?;

        if record.status != OnboardingStatus::InProgress {
            return Ok(false);
        }
        let Some(started_at) = record.started_at else {
            return Ok(false);
        };
        if Utc::now() - started_at <= Duration::days(max_days) {
            return Ok(false);
        }

        let mut next = record;
        next.clear();
        self.store.commit(user_id, &next).await?;
        tracing::info!(%user_id, max_days, "Idle onboarding session reset");
        Ok(true)
    }

    /// Prompt for `step`, personalized with collected data when we have it.
    fn personalized_prompt(&self, step: OnboardingStep, record: &OnboardingRecord) -> String {
        let prompt = step.prompt().to_string();
        if step == OnboardingStep::Goals
            && let Some(name) = record.collected.get("name").and_then(|v| v.as_str())
        {
            return prompt.replacen(
                "Prazer em te conhecer!",
                &format!("Prazer em te conhecer, {name}!"),
                1,
            );
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn engine() -> (OnboardingEngine, Arc<MemoryStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let engine = OnboardingEngine::new(store.clone());
        (engine, store, Uuid::new_v4())
    }

    #[tokio::test]
    async fn start_transitions_to_welcome() {
        let (engine, _, user) = engine();
        let status = engine.start(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::InProgress);
        assert_eq!(status.current_step, Some(OnboardingStep::Welcome));
        assert!(status.started_at.is_some());
        assert_eq!(status.progress_percent, 0);
    }

    #[tokio::test]
    async fn start_while_in_progress_is_idempotent() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();
        engine.process_response(user, "vamos").await.unwrap();

        let resumed = engine.start(user).await.unwrap();
        assert_eq!(resumed.current_step, Some(OnboardingStep::Name));
    }

    #[tokio::test]
    async fn start_after_completed_fails() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();
        engine.skip(user).await.unwrap();

        let err = engine.start(user).await.unwrap_err();
        assert!(matches!(err, OnboardingError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn process_before_start_fails() {
        let (engine, _, user) = engine();
        let err = engine.process_response(user, "oi").await.unwrap_err();
        assert!(matches!(err, OnboardingError::NotStarted));
    }

    #[tokio::test]
    async fn full_walk_visits_every_step_in_order() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();

        let responses = [
            ("vamos", OnboardingStep::Welcome, Some(OnboardingStep::Name)),
            ("João", OnboardingStep::Name, Some(OnboardingStep::Goals)),
            (
                "Crescer na carreira, melhorar saúde",
                OnboardingStep::Goals,
                Some(OnboardingStep::Preferences),
            ),
            (
                "America/Sao_Paulo",
                OnboardingStep::Preferences,
                Some(OnboardingStep::Conclusion),
            ),
            ("vamos!", OnboardingStep::Conclusion, None),
        ];

        for (text, expected_current, expected_next) in responses {
            let outcome = engine.process_response(user, text).await.unwrap();
            assert!(outcome.is_valid, "step {expected_current} should accept {text:?}");
            assert_eq!(outcome.current_step, expected_current);
            assert_eq!(outcome.next_step, expected_next);
        }

        let status = engine.get_status(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::Completed);
        assert!(status.completed_at.is_some());
        assert_eq!(status.progress_percent, 100);
        assert_eq!(status.collected["name"], "João");
        assert_eq!(
            status.collected["goals"],
            serde_json::json!(["Crescer na carreira", "melhorar saúde"])
        );
        assert_eq!(status.collected["timezone"], "America/Sao_Paulo");
        assert_eq!(status.collected["language"], "pt-BR");
    }

    #[tokio::test]
    async fn invalid_input_leaves_state_unchanged() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();
        engine.process_response(user, "vamos").await.unwrap(); // → Name

        let outcome = engine.process_response(user, "  ").await.unwrap();
        assert!(!outcome.is_valid);
        assert!(!outcome.validation_error.as_deref().unwrap_or("").is_empty());
        assert_eq!(outcome.current_step, OnboardingStep::Name);
        assert_eq!(outcome.next_step, None);
        // Re-prompts the same step
        assert_eq!(
            outcome.next_prompt.as_deref(),
            Some(OnboardingStep::Name.prompt())
        );

        let status = engine.get_status(user).await.unwrap();
        assert_eq!(status.current_step, Some(OnboardingStep::Name));
        assert!(status.collected.get("name").is_none());
    }

    #[tokio::test]
    async fn goals_prompt_is_personalized_with_name() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();
        engine.process_response(user, "vamos").await.unwrap();

        let outcome = engine.process_response(user, "Maria").await.unwrap();
        let prompt = outcome.next_prompt.unwrap();
        assert!(prompt.starts_with("Prazer em te conhecer, Maria!"));
    }

    #[tokio::test]
    async fn history_records_each_extracting_response() {
        let (engine, store, user) = engine();
        engine.start(user).await.unwrap();
        engine.process_response(user, "vamos").await.unwrap();
        engine.process_response(user, "Maria").await.unwrap();
        engine.process_response(user, "ler mais").await.unwrap();

        let record = store.load(user).await.unwrap();
        assert_eq!(record.history.len(), 2);
        assert_eq!(record.history[0].step, OnboardingStep::Name);
        assert_eq!(record.history[0].response, "Maria");
        assert_eq!(record.history[1].step, OnboardingStep::Goals);
    }

    #[tokio::test]
    async fn skip_completes_immediately_and_only_once() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();

        let status = engine.skip(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::Completed);
        assert!(status.completed_at.is_some());
        assert!(status.current_step.is_none());

        let err = engine.skip(user).await.unwrap_err();
        assert!(matches!(err, OnboardingError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn skip_works_from_not_started() {
        let (engine, _, user) = engine();
        let status = engine.skip(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::Completed);
    }

    #[tokio::test]
    async fn reset_clears_everything_from_any_state() {
        let (engine, _, user) = engine();
        engine.start(user).await.unwrap();
        engine.process_response(user, "vamos").await.unwrap();
        engine.process_response(user, "Ana").await.unwrap();

        let status = engine.reset(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::NotStarted);
        assert!(status.current_step.is_none());
        assert!(status.started_at.is_none());
        assert!(status.collected.is_empty());

        // Can start again after a reset
        let restarted = engine.start(user).await.unwrap();
        assert_eq!(restarted.current_step, Some(OnboardingStep::Welcome));
    }

    #[tokio::test]
    async fn idle_timeout_resets_stale_sessions_only() {
        let (engine, store, user) = engine();
        engine.start(user).await.unwrap();

        // Fresh session: no-op
        assert!(!engine.check_idle_timeout(user).await.unwrap());

        // Backdate the session past the default 7-day window
        let mut record = store.load(user).await.unwrap();
        record.started_at = Some(Utc::now() - Duration::days(10));
        store.commit(user, &record).await.unwrap();

        assert!(engine.check_idle_timeout(user).await.unwrap());
        let status = engine.get_status(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::NotStarted);
        assert!(status.current_step.is_none());
        assert!(status.collected.is_empty());
    }

    #[tokio::test]
    async fn idle_timeout_window_comes_from_config() {
        let store = Arc::new(MemoryStore::new());
        let engine = OnboardingEngine::with_config(
            store.clone(),
            crate::config::OnboardingConfig {
                idle_timeout_days: 3,
            },
        );
        let user = Uuid::new_v4();
        engine.start(user).await.unwrap();

        let mut record = store.load(user).await.unwrap();
        record.started_at = Some(Utc::now() - Duration::days(5));
        store.commit(user, &record).await.unwrap();

        // 5 days idle is past a 3-day window but inside the default 7
        assert!(engine.check_idle_timeout(user).await.unwrap());
    }

    #[tokio::test]
    async fn idle_timeout_never_touches_completed_or_not_started() {
        let (engine, store, user) = engine();

        // NOT_STARTED: no-op
        assert!(!engine.check_idle_timeout(user).await.unwrap());

        // COMPLETED with an ancient started_at: still a no-op
        engine.start(user).await.unwrap();
        engine.skip(user).await.unwrap();
        let mut record = store.load(user).await.unwrap();
        record.started_at = Some(Utc::now() - Duration::days(100));
        store.commit(user, &record).await.unwrap();

        assert!(!engine.check_idle_timeout(user).await.unwrap());
        let status = engine.get_status(user).await.unwrap();
        assert_eq!(status.status, OnboardingStatus::Completed);
    }
}
