//! Canonical prompt-mode schema.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A single task or prompt, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSchema {
    pub task: String,
    pub intent: String,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub entities: Vec<Entity>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl PromptSchema {
    pub fn new(task: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            intent: intent.into(),
            entities: Vec::new(),
            steps: Vec::new(),
            constraints: Vec::new(),
            context: None,
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Context text, if present and non-blank.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Something the prompt talks about: a feature, component, data, tool or concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
        }
    }
}
