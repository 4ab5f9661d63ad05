//! Unified error handling for SMPL Core.
//!
//! [`SmplError`] wraps domain and application failures. Each variant knows its
//! [`ErrorCategory`] and the suggestions the CLI shows next to it.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for SMPL Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmplError {
    /// Errors from the domain layer (bad schemas, unknown values).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SmplError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Inspect the effective configuration with: smpl config list".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in SMPL".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Unsupported => ErrorCategory::Unsupported,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::UpstreamUnavailable { .. }
                    | ApplicationError::MutationInFlight { .. }
                    | ApplicationError::HistoryUnavailable { .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    /// Operation not valid in the current lifecycle state.
    State,
    Upstream,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SmplResult<T> = Result<T, SmplError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;

    #[test]
    fn upstream_failures_are_retryable() {
        let err: SmplError = ApplicationError::upstream("timeout").into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Upstream);
    }

    #[test]
    fn lifecycle_misuse_is_state_category() {
        let err: SmplError = ApplicationError::NothingToRestore { mode: Mode::App }.into();
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::State);
    }

    #[test]
    fn domain_categories_map_through() {
        let err: SmplError = DomainError::UnsupportedTool { tool: "x".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Unsupported);
        assert!(!err.suggestions().is_empty());
    }
}
