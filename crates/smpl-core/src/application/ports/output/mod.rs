//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `smpl-adapters` crate provides implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Enhancement, ExportPrompts, ExportTool, InputKind, Mode};
use crate::error::SmplResult;

/// Input to the normalization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
    pub mode: Mode,
    pub input_kind: InputKind,
}

impl NormalizeRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        let text = text.into();
        let input_kind = InputKind::detect(&text);
        Self {
            text,
            mode,
            input_kind,
        }
    }
}

/// Input to the enhancement call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub text: String,
    pub mode: Mode,
    /// Non-empty, without duplicates, in the order given.
    pub enhancements: Vec<Enhancement>,
}

/// Port for the language model that does the semantic work.
///
/// Implemented by:
/// - `smpl_adapters::llm::OpenAiClient` (chat completions over HTTP)
/// - `smpl_adapters::llm::ScriptedModel` (offline, fixed responses)
///
/// ## Design Notes
///
/// - `normalize` returns an unvalidated candidate; the caller validates it
/// - `shrink`, `expand` and `enhance` return free text and are never parsed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Turn freeform input into a candidate canonical schema.
    async fn normalize(&self, request: &NormalizeRequest) -> SmplResult<Value>;

    /// Rewrite a DSL into a more compact form for `tool`.
    async fn shrink(&self, dsl: &str, tool: ExportTool) -> SmplResult<String>;

    /// Rewrite a DSL into a long-form prompt for `tool`.
    async fn expand(&self, dsl: &str, tool: ExportTool) -> SmplResult<String>;

    /// Rewrite a description with UI/UX enhancements added as a separate
    /// section. Functional requirements stay as written.
    async fn enhance(&self, request: &EnhanceRequest) -> SmplResult<String>;
}

/// Failure inside an exact tokenizer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TokenizerError {
    /// The vocabulary could not be loaded.
    #[error("tokenizer initialization failed: {0}")]
    Init(String),

    #[error("encoding failed: {0}")]
    Encode(String),
}

/// Port for exact BPE token counting.
///
/// Implemented by:
/// - `smpl_adapters::tokenizer::TiktokenCounter` (cl100k_base)
///
/// Implementations own their vocabulary and build it lazily; the first call
/// may be slow and may fail with [`TokenizerError::Init`].
#[cfg_attr(test, mockall::automock)]
pub trait ExactTokenizer: Send + Sync {
    fn count(&self, text: &str) -> Result<usize, TokenizerError>;
}

/// One persisted generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: Uuid,
    pub input_text: String,
    pub input_type: InputKind,
    pub mode: Mode,
    pub json: Value,
    pub dsl: String,
    pub expanded: String,
    pub export_prompts: ExportPrompts,
    /// DSL token count.
    pub token_count: usize,
    /// Savings percent of the DSL over the input.
    pub quality_score: f64,
    pub saved: bool,
    /// RFC 3339 timestamp, stamped by the store on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

/// Port for generation history.
///
/// Implemented by:
/// - `smpl_adapters::history::InMemoryHistory` (testing)
/// - `smpl_adapters::history::JsonlHistory` (append-only file)
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStore: Send + Sync {
    fn save(&self, record: GenerationRecord) -> SmplResult<()>;

    /// Most recent records first, at most `limit`.
    fn list(&self, limit: usize) -> SmplResult<Vec<GenerationRecord>>;
}
