//! Orchestrator — turns one user message into one reply, degrading
//! gracefully at every step.
//!
//! The public contract is infallible: whatever breaks inside (context
//! build, routing, skill execution, LLM call), the caller always gets
//! reply text back.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::OrchestratorConfig;
use crate::context::{ContextProvider, UserContext};
use crate::llm::LlmProvider;
use crate::skills::executor::SkillExecutor;
use crate::skills::skill::SkillResult;

use super::action::{Action, ActionKind};
use super::router::Router;

/// Routes messages and assembles replies.
pub struct Orchestrator {
    llm: Arc<dyn LlmProvider>,
    executor: Arc<SkillExecutor>,
    context_provider: Arc<dyn ContextProvider>,
    router: Arc<dyn Router>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        executor: Arc<SkillExecutor>,
        context_provider: Arc<dyn ContextProvider>,
        router: Arc<dyn Router>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            llm,
            executor,
            context_provider,
            router,
            config,
        }
    }

    /// Process a user message and return the reply text. Never fails.
    pub async fn process_message(
        &self,
        user_id: Uuid,
        message: &str,
        conversation_id: Uuid,
    ) -> String {
        tracing::info!(%user_id, %conversation_id, "Processing message");

        let context = self.build_context(user_id).await;

        let action = self.router.decide(message, &context);
        tracing::info!(
            kind = ?action.kind,
            skill = action.skill_name.as_deref().unwrap_or("-"),
            reasoning = action.reasoning.as_deref().unwrap_or(""),
            "Decided action"
        );

        let response = match action.kind {
            ActionKind::SkillCall => match self.execute_skill(&action).await {
                Some(skill_result) if skill_result.success => {
                    let skill_output = format_skill_result(&skill_result);
                    self.respond_with_skill_result(
                        message,
                        action.skill_name.as_deref().unwrap_or(""),
                        &skill_output,
                    )
                    .await
                }
                Some(skill_result) => {
                    let error = skill_result
                        .error
                        .unwrap_or_else(|| "Unknown error".to_string());
                    tracing::warn!(%error, "Skill execution failed");
                    format!(
                        "I apologize, but I encountered an error while trying to help you: {error}"
                    )
                }
                None => self.config.fallback_message.clone(),
            },
            ActionKind::DirectResponse => self.respond_directly(message).await,
        };

        tracing::info!(length = response.len(), "Generated response");
        response
    }

    /// Build context, falling back to the minimal user-id-only snapshot.
    async fn build_context(&self, user_id: Uuid) -> UserContext {
        match self.context_provider.build_context(user_id).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "Failed to build context");
                UserContext::minimal(user_id)
            }
        }
    }

    /// Run the action's skill on its own task; a missing skill name or
    /// unknown skill is a failure result, never a propagated error. `None`
    /// means the task itself died (a panicking skill) and the caller falls
    /// back to the fixed guard message.
    async fn execute_skill(&self, action: &Action) -> Option<SkillResult> {
        let Some(skill_name) = action.skill_name.clone() else {
            return Some(SkillResult::fail("No skill name specified"));
        };
        let args = serde_json::Value::Object(action.skill_args.clone());
        let executor = self.executor.clone();
        let task =
            tokio::spawn(async move { executor.execute_with_fallback(&skill_name, args, None).await });
        match task.await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!(error = %e, "Skill task aborted");
                None
            }
        }
    }

    /// Narrate a successful skill result; on LLM failure, hand the raw
    /// serialized result to the user instead of failing outright.
    async fn respond_with_skill_result(
        &self,
        message: &str,
        skill_name: &str,
        skill_output: &str,
    ) -> String {
        let system_prompt = format!(
            "You are a helpful AI assistant.\n\
             The user asked: \"{message}\"\n\n\
             You invoked the skill '{skill_name}' and got this result:\n\
             {skill_output}\n\n\
             Use this information to provide a helpful, conversational response to the user.\n\
             Be natural and friendly."
        );

        match self.llm.generate_reply(message, &system_prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Failed to narrate skill result");
                format!("Here's what I found:\n{skill_output}")
            }
        }
    }

    async fn respond_directly(&self, message: &str) -> String {
        let system_prompt = "You are a helpful AI assistant. Be friendly and conversational.";
        match self.llm.generate_reply(message, system_prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate direct response");
                "I apologize, but I'm having trouble generating a response right now.".to_string()
            }
        }
    }
}

/// Serialize result data for the LLM: pretty JSON when possible, plain
/// string form otherwise.
fn format_skill_result(result: &SkillResult) -> String {
    let Some(ref data) = result.data else {
        return "No data returned".to_string();
    };
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}
