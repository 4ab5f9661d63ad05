//! Mode-tagged canonical schema.

use serde_json::Value;

use super::{AppSchema, PromptSchema};
use crate::domain::{
    error::DomainError,
    export::{self, ExportPrompts},
    render,
    validation::SchemaValidator,
    value_objects::Mode,
};

/// The canonical form of one generation, whichever mode produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalSchema {
    App(AppSchema),
    Prompt(PromptSchema),
}

impl CanonicalSchema {
    /// Validate a candidate as the schema shape `mode` expects.
    pub fn validate(mode: Mode, candidate: &Value) -> Result<Self, DomainError> {
        match mode {
            Mode::App => SchemaValidator::validate_app(candidate).map(Self::App),
            Mode::Prompt => SchemaValidator::validate_prompt(candidate).map(Self::Prompt),
        }
    }

    /// Parse and validate raw JSON text.
    pub fn parse(mode: Mode, text: &str) -> Result<Self, DomainError> {
        match mode {
            Mode::App => SchemaValidator::parse_app(text).map(Self::App),
            Mode::Prompt => SchemaValidator::parse_prompt(text).map(Self::Prompt),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::App(_) => Mode::App,
            Self::Prompt(_) => Mode::Prompt,
        }
    }

    /// App name or task; what the schema is about.
    pub fn title(&self) -> &str {
        match self {
            Self::App(s) => &s.app_name,
            Self::Prompt(s) => &s.task,
        }
    }

    pub fn to_json(&self) -> String {
        match self {
            Self::App(s) => render::to_canonical_json(s),
            Self::Prompt(s) => render::to_prompt_json(s),
        }
    }

    pub fn to_dsl(&self) -> String {
        match self {
            Self::App(s) => render::to_dsl(s),
            Self::Prompt(s) => render::to_prompt_dsl(s),
        }
    }

    pub fn to_markdown(&self) -> String {
        match self {
            Self::App(s) => render::to_expanded_markdown(s),
            Self::Prompt(s) => render::to_prompt_markdown(s),
        }
    }

    /// Export prompts for every registered tool.
    pub fn exports(&self, dsl: &str, json: &str) -> ExportPrompts {
        match self {
            Self::App(s) => export::synthesize_all(s, dsl, json),
            Self::Prompt(s) => export::synthesize_all_prompt(s, dsl, json),
        }
    }
}

impl From<AppSchema> for CanonicalSchema {
    fn from(schema: AppSchema) -> Self {
        Self::App(schema)
    }
}

impl From<PromptSchema> for CanonicalSchema {
    fn from(schema: PromptSchema) -> Self {
        Self::Prompt(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_against_requested_mode() {
        let prompt = json!({
            "task": "t", "intent": "i", "entities": [], "steps": [], "constraints": []
        });
        assert!(CanonicalSchema::validate(Mode::Prompt, &prompt).is_ok());
        assert!(CanonicalSchema::validate(Mode::App, &prompt).is_err());
    }

    #[test]
    fn title_follows_mode() {
        let schema: CanonicalSchema = PromptSchema::new("Write docs", "clarity").into();
        assert_eq!(schema.title(), "Write docs");
        assert_eq!(schema.mode(), Mode::Prompt);
        assert!(schema.to_dsl().starts_with("PROMPT(Write docs){"));
    }
}
