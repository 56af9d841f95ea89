//! Error types for the Virtus core.

/// Top-level error type for the core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Skill error: {0}")]
    Skill(#[from] SkillError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),
}

/// Skill lookup and execution errors.
///
/// `NotFound` is the one condition the executor re-raises; everything else
/// is folded into a failure `SkillResult` at the executor boundary.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Skill '{name}' not found in registry")]
    NotFound { name: String },

    #[error("Skill '{name}' is already registered. Unregister it first to replace it")]
    Duplicate { name: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Skill execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SkillError {
    /// Short tag used when the executor folds an error into a result
    /// (`"<kind>: <message>"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::Duplicate { .. } => "Duplicate",
            Self::InvalidParameters(_) => "InvalidParameters",
            Self::ExecutionFailed(_) => "ExecutionFailed",
            Self::Store(_) => "StoreError",
        }
    }
}

/// LLM collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Context collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("User {user_id} not found")]
    UserNotFound { user_id: uuid::Uuid },

    #[error("Context build failed: {0}")]
    BuildFailed(String),
}

/// Persistence collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity not found: {entity} for user {user_id}")]
    NotFound { entity: String, user_id: String },

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Onboarding state machine errors — expected, recoverable conditions.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Onboarding already completed for this user")]
    AlreadyCompleted,

    #[error("Onboarding not started")]
    NotStarted,

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for the core.
pub type Result<T> = std::result::Result<T, Error>;
