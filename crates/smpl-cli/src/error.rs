//! Error handling for the SMPL CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use smpl_core::error::SmplError;

// Re-export so callers only need `use crate::error::*`.
pub use smpl_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An input or schema file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A configuration file already exists and `--force` was not given.
    #[error("Configuration already exists at {}", path.display())]
    ConfigExists { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `smpl-core` or an adapter.
    #[error("{0}")]
    Core(#[from] SmplError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Feature not available (e.g., interactive session without the feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<smpl_core::domain::DomainError> for CliError {
    fn from(err: smpl_core::domain::DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::FileNotFound { path } => vec![
                format!("'{}' does not exist", path.display()),
                "Check the path, or pass the text directly as an argument".into(),
            ],

            Self::ConfigExists { path } => vec![
                format!("'{}' is already present", path.display()),
                "Use --force to overwrite it".into(),
                "Inspect the current values with: smpl config list".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'smpl init --force' to write a fresh default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                format!("Install with the feature enabled: cargo install smpl-cli --features {feature}"),
                "Or script the session with --steps shrink,expand,restore".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Unsupported | CoreCategory::State => {
                    ErrorCategory::UserError
                }
                CoreCategory::Upstream => ErrorCategory::Upstream,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Upstream      |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Upstream => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if self.is_retryable() {
            output.push_str(&format!("\n{}\n", "This may succeed if you try again.".dimmed()));
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if self.is_retryable() {
            out.push_str("\nThis may succeed if you try again.\n");
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Machine-readable rendering for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "category": self.category().as_str(),
            "exit_code": self.exit_code(),
            "retryable": self.is_retryable(),
            "suggestions": self.suggestions(),
        })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_retryable())
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Upstream => tracing::error!("Upstream error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, lifecycle misuse).
    UserError,
    NotFound,
    Configuration,
    /// The language model endpoint failed or timed out.
    Upstream,
    /// Internal/system error.
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserError => "user",
            Self::NotFound => "not_found",
            Self::Configuration => "configuration",
            Self::Upstream => "upstream",
            Self::Internal => "internal",
        }
    }
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    /// Startup plumbing (config loading) reports through `anyhow`.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}
