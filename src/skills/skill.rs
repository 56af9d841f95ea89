//! The `Skill` trait and its result/parameter value types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SkillError;

/// Outcome of running a skill.
///
/// Exactly one branch is meaningful: `data` on success, a non-empty `error`
/// on failure. Serializes losslessly so results can cross process or
/// conversation boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SkillResult {
    /// Successful result carrying `data`.
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed result carrying a human-readable error.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// JSON-Schema primitive type tag for a skill parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// Static metadata describing one skill parameter.
///
/// Used only to derive the JSON-Schema object handed to the LLM's
/// function-calling API; skills validate their own incoming args.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillParameter {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl SkillParameter {
    /// Render this parameter as a JSON-Schema property object.
    pub fn to_schema(&self) -> serde_json::Value {
        let mut schema = serde_json::json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if let Some(ref default) = self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Build a JSON-Schema `object` from a parameter list.
pub fn parameters_to_schema(params: &[SkillParameter]) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for p in params {
        properties.insert(p.name.clone(), p.to_schema());
        if p.required {
            required.push(serde_json::Value::String(p.name.clone()));
        }
    }
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// A named, independently executable capability.
///
/// Implementations may use `?` internally and return `Err`; the executor is
/// the boundary that converts any error into a failure [`SkillResult`].
#[async_trait]
pub trait Skill: Send + Sync {
    /// Unique skill identifier.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON-Schema object describing the accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Run the skill with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<SkillResult, SkillError>;

    /// Export as an LLM function-calling tool definition.
    ///
    /// The shape `{"type":"function","function":{name,description,parameters}}`
    /// is fixed by the function-calling contract and must not change.
    fn to_tool_definition(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema(),
            },
        })
    }
}

/// Extract a required string argument, or fail with `InvalidParameters`.
pub fn require_str<'a>(params: &'a serde_json::Value, key: &str) -> Result<&'a str, SkillError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SkillError::InvalidParameters(format!("Missing required field: {}", key)))
}
