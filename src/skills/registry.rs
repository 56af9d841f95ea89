//! Skill registry for managing available skills.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::SkillError;
use crate::skills::skill::Skill;

/// Introspection metadata for one registered skill.
#[derive(Debug, Clone, Serialize)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Registry of available skills, keyed by name.
///
/// Populated once at startup and read-mostly afterwards; the single RwLock
/// is the coarse guard that makes runtime re-registration safe too.
pub struct SkillRegistry {
    skills: RwLock<IndexMap<String, Arc<dyn Skill>>>,
}

impl SkillRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            skills: RwLock::new(IndexMap::new()),
        }
    }

    /// Register a skill under its name.
    ///
    /// Fails if the name is already taken — replacing a skill requires an
    /// explicit `unregister` first, so nothing gets shadowed silently.
    pub async fn register(&self, skill: Arc<dyn Skill>) -> Result<(), SkillError> {
        let name = skill.name().to_string();
        let mut skills = self.skills.write().await;
        if skills.contains_key(&name) {
            return Err(SkillError::Duplicate { name });
        }
        skills.insert(name.clone(), skill);
        tracing::debug!(skill = %name, "Registered skill");
        Ok(())
    }

    /// Remove a skill. Idempotent: absent names are a no-op.
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn Skill>> {
        // shift_remove keeps the remaining insertion order intact
        self.skills.write().await.shift_remove(name)
    }

    /// Get a skill by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Skill>> {
        self.skills.read().await.get(name).cloned()
    }

    /// Check if a skill is registered.
    pub async fn has(&self, name: &str) -> bool {
        self.skills.read().await.contains_key(name)
    }

    /// Number of registered skills.
    pub async fn len(&self) -> usize {
        self.skills.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.skills.read().await.is_empty()
    }

    /// List all skills with their metadata, in registration order.
    pub async fn list(&self) -> Vec<SkillInfo> {
        self.skills
            .read()
            .await
            .values()
            .map(|skill| SkillInfo {
                name: skill.name().to_string(),
                description: skill.description().to_string(),
                parameters: skill.parameters_schema(),
            })
            .collect()
    }

    /// Export all skills as LLM function-calling tool definitions,
    /// in registration order.
    pub async fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.skills
            .read()
            .await
            .values()
            .map(|skill| skill.to_tool_definition())
            .collect()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::skill::SkillResult;
    use async_trait::async_trait;

    struct MockSkill {
        name: String,
    }

    #[async_trait]
    impl Skill for MockSkill {
        fn name(&self) -> &str {
            &self.name
        }
        fn description(&self) -> &str {
            "A mock skill for testing"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}, "required": []})
        }
        async fn execute(
            &self,
            _args: serde_json::Value,
        ) -> Result<SkillResult, crate::error::SkillError> {
            Ok(SkillResult::ok(serde_json::json!("mock")))
        }
    }

    fn mock(name: &str) -> Arc<dyn Skill> {
        Arc::new(MockSkill {
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn register_and_get() {
        let registry = SkillRegistry::new();
        registry.register(mock("test_skill")).await.unwrap();

        assert!(registry.has("test_skill").await);
        assert!(!registry.has("nonexistent").await);

        let retrieved = registry.get("test_skill").await;
        assert_eq!(retrieved.unwrap().name(), "test_skill");
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let registry = SkillRegistry::new();
        registry.register(mock("dup")).await.unwrap();

        let err = registry.register(mock("dup")).await.unwrap_err();
        assert!(matches!(err, SkillError::Duplicate { ref name } if name == "dup"));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let registry = SkillRegistry::new();
        registry.register(mock("temp")).await.unwrap();

        assert!(registry.unregister("temp").await.is_some());
        assert!(registry.unregister("temp").await.is_none());
        assert!(!registry.has("temp").await);
    }

    #[tokio::test]
    async fn unregister_then_register_replaces() {
        let registry = SkillRegistry::new();
        registry.register(mock("swap")).await.unwrap();
        registry.unregister("swap").await;
        registry.register(mock("swap")).await.unwrap();
        assert!(registry.has("swap").await);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let registry = SkillRegistry::new();
        registry.register(mock("alpha")).await.unwrap();
        registry.register(mock("beta")).await.unwrap();
        registry.register(mock("gamma")).await.unwrap();

        let names: Vec<String> = registry.list().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn tool_definitions_have_function_calling_shape() {
        let registry = SkillRegistry::new();
        registry.register(mock("my_skill")).await.unwrap();

        let defs = registry.tool_definitions().await;
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0]["type"], "function");
        assert_eq!(defs[0]["function"]["name"], "my_skill");
        assert_eq!(defs[0]["function"]["parameters"]["type"], "object");
    }
}
