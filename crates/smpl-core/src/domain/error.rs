use thiserror::Error;

use crate::domain::{enhancement::Enhancement, value_objects::Platform};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are cached and replayed by the session)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid schema: {reason}")]
    InvalidSchema { reason: String },

    #[error("Malformed JSON at line {line}, column {column}: {reason}")]
    MalformedJson {
        reason: String,
        line: usize,
        column: usize,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("No enhancement selected")]
    NoEnhancements,

    // ========================================================================
    // Unsupported Values (422-level equivalent)
    // ========================================================================
    #[error("Unsupported platform '{platform}'")]
    UnsupportedPlatform { platform: String },

    #[error("Unsupported mode '{mode}'")]
    UnsupportedMode { mode: String },

    #[error("Unsupported export tool '{tool}'")]
    UnsupportedTool { tool: String },

    #[error("Unsupported tokenizer family '{family}'")]
    UnsupportedFamily { family: String },

    #[error("Unsupported enhancement '{enhancement}'")]
    UnsupportedEnhancement { enhancement: String },
}

impl DomainError {
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSchema { reason } => vec![
                "The schema does not have the expected top-level shape".into(),
                format!("Details: {reason}"),
                "Check the output with: smpl render --format json <file>".into(),
            ],
            Self::MalformedJson { line, column, .. } => vec![
                format!("Fix the JSON syntax near line {line}, column {column}"),
                "Comments and trailing commas are not valid JSON".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Add a '{field}' field to the schema")]
            }
            Self::UnsupportedPlatform { .. } => vec![format!(
                "Supported platforms: {}",
                Platform::ALL.map(|p| p.as_str()).join(", ")
            )],
            Self::UnsupportedMode { .. } => vec!["Supported modes: app, prompt".into()],
            Self::UnsupportedTool { .. } => vec![
                "Supported tools: cursor, claude, bolt, v0, replit, openai, anthropic".into(),
                "Try: smpl tools".into(),
            ],
            Self::UnsupportedFamily { .. } => {
                vec!["Supported tokenizer families: gpt, claude".into()]
            }
            Self::NoEnhancements | Self::UnsupportedEnhancement { .. } => {
                vec![format!("Supported enhancements: {}", Enhancement::supported())]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSchema { .. }
            | Self::MalformedJson { .. }
            | Self::MissingRequiredField { .. }
            | Self::NoEnhancements => ErrorCategory::Validation,
            Self::UnsupportedPlatform { .. }
            | Self::UnsupportedMode { .. }
            | Self::UnsupportedTool { .. }
            | Self::UnsupportedFamily { .. }
            | Self::UnsupportedEnhancement { .. } => ErrorCategory::Unsupported,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson {
            reason: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_syntax_errors_carry_position() {
        let err: DomainError = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        match err {
            DomainError::MalformedJson { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn categories() {
        assert_eq!(
            DomainError::invalid_schema("x").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::UnsupportedTool { tool: "x".into() }.category(),
            ErrorCategory::Unsupported
        );
    }
}
