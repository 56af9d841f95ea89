//! Configuration types.

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Lookahead window passed to the calendar skill, in days.
    pub calendar_days_ahead: i64,
    /// Maximum number of calendar events a single call returns.
    pub calendar_event_limit: usize,
    /// Fixed message returned when everything else failed.
    pub fallback_message: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            calendar_days_ahead: 7,
            calendar_event_limit: 50,
            fallback_message:
                "I apologize, but I'm experiencing technical difficulties. Please try again later."
                    .to_string(),
        }
    }
}

/// Onboarding configuration.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Sessions idle longer than this are reset by `check_idle_timeout`.
    pub idle_timeout_days: i64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            idle_timeout_days: 7,
        }
    }
}
