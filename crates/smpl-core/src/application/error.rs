//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::domain::Mode;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The language model could not be reached or answered with garbage.
    #[error("Language model unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    /// The exact tokenizer could not be built.
    #[error("Tokenizer initialization failed: {reason}")]
    TokenizerInitFailure { reason: String },

    /// Another request is already running for this mode.
    #[error("A {mode} request is already in progress")]
    MutationInFlight { mode: Mode },

    /// Restore requested while the displayed DSL is already the original.
    #[error("Nothing to restore: the {mode} DSL is unmodified")]
    NothingToRestore { mode: Mode },

    /// Lifecycle operation before any generation in this mode.
    #[error("No {mode} output has been generated yet")]
    NotGenerated { mode: Mode },

    /// Session state access failed (lock poisoned).
    #[error("Session state error")]
    StateLockError,

    /// History store could not be read or written.
    #[error("History unavailable: {reason}")]
    HistoryUnavailable { reason: String },
}

impl ApplicationError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
        }
    }

    pub fn history(reason: impl Into<String>) -> Self {
        Self::HistoryUnavailable {
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UpstreamUnavailable { reason } => vec![
                format!("Upstream said: {reason}"),
                "Check that the API key environment variable is set".into(),
                "Try again in a moment, or use --schema FILE to work offline".into(),
            ],
            Self::TokenizerInitFailure { .. } => vec![
                "Exact counts are unavailable; approximate counts are used instead".into(),
            ],
            Self::MutationInFlight { .. } => vec![
                "Wait for the running request on this mode to finish".into(),
            ],
            Self::NothingToRestore { .. } => vec![
                "Restore undoes a shrink; run shrink first".into(),
            ],
            Self::NotGenerated { .. } => vec!["Run generate first".into()],
            Self::StateLockError => vec![
                "Session state was poisoned by an earlier panic".into(),
                "Start a new session".into(),
            ],
            Self::HistoryUnavailable { .. } => vec![
                "Check the history path in your config (smpl config get history.path)".into(),
                "Or disable history with history.enabled = false".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UpstreamUnavailable { .. } => ErrorCategory::Upstream,
            Self::MutationInFlight { .. }
            | Self::NothingToRestore { .. }
            | Self::NotGenerated { .. } => ErrorCategory::State,
            Self::HistoryUnavailable { .. } => ErrorCategory::Configuration,
            Self::TokenizerInitFailure { .. } | Self::StateLockError => ErrorCategory::Internal,
        }
    }
}
