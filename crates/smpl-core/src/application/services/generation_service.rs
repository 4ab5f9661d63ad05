//! Generation Service - the end-to-end pipeline.
//!
//! This service coordinates one generation:
//! 1. Detect the input kind
//! 2. Ask the language model for a candidate schema
//! 3. Validate it into the canonical form
//! 4. Render JSON, DSL, expanded spec and every export prompt
//! 5. Count tokens for the selected tool
//! 6. Persist the record on the blocking pool (failures are logged, never returned)
//!
//! It also runs the standalone enhancement call, which rewrites freeform
//! text and produces no schema.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ports::{EnhanceRequest, GenerationRecord, HistoryStore, LanguageModel, NormalizeRequest},
        services::token_accountant::TokenAccountant,
    },
    domain::{
        CanonicalSchema, DomainError, Enhancement, ExportPrompts, ExportTool, InputKind, Mode,
        TokenStats,
    },
    error::SmplResult,
};

/// The four rendered outputs of a generation.
///
/// Either every slot carries real content, or every slot carries the same
/// error placeholder. Never a mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSlots {
    pub json: String,
    pub dsl: String,
    pub expanded: String,
    pub exports: ExportPrompts,
}

impl OutputSlots {
    /// Render every slot from a canonical schema.
    pub fn render(schema: &CanonicalSchema) -> Self {
        let json = schema.to_json();
        let dsl = schema.to_dsl();
        let expanded = schema.to_markdown();
        let exports = schema.exports(&dsl, &json);
        Self {
            json,
            dsl,
            expanded,
            exports,
        }
    }

    /// Every slot set to the same error placeholder.
    pub fn failed(message: impl AsRef<str>) -> Self {
        let placeholder = format!("Error: {}", message.as_ref());
        Self {
            json: placeholder.clone(),
            dsl: placeholder.clone(),
            expanded: placeholder.clone(),
            exports: crate::domain::registry::all_tools()
                .map(|tool| (tool, placeholder.clone()))
                .collect(),
        }
    }

    /// Export prompt for `tool`, falling back to the default tool's.
    pub fn export_for(&self, tool: ExportTool) -> &str {
        self.exports
            .get(&tool)
            .or_else(|| self.exports.get(&ExportTool::DEFAULT))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Everything one generation produced.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub id: Uuid,
    pub input: String,
    pub input_kind: InputKind,
    pub tool: ExportTool,
    pub schema: Arc<CanonicalSchema>,
    pub slots: OutputSlots,
    pub token_stats: TokenStats,
}

impl GenerationResult {
    pub fn mode(&self) -> Mode {
        self.schema.mode()
    }

    /// The export prompt for the tool this generation targeted.
    pub fn best_export(&self) -> &str {
        self.slots.export_for(self.tool)
    }

    pub fn to_record(&self) -> SmplResult<GenerationRecord> {
        let json = serde_json::from_str(&self.slots.json).map_err(DomainError::from)?;
        Ok(GenerationRecord {
            id: self.id,
            input_text: self.input.clone(),
            input_type: self.input_kind,
            mode: self.mode(),
            json,
            dsl: self.slots.dsl.clone(),
            expanded: self.slots.expanded.clone(),
            export_prompts: self.slots.exports.clone(),
            token_count: self.token_stats.dsl.count,
            quality_score: self.token_stats.savings.percent,
            saved: false,
            saved_at: None,
        })
    }
}

/// A description rewritten with UI/UX enhancements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enhanced {
    pub text: String,
    pub mode: Mode,
    pub enhancements: Vec<Enhancement>,
    /// Characters in the trimmed input.
    pub original_length: usize,
    pub enhanced_length: usize,
}

/// Main generation service.
pub struct GenerationService {
    model: Arc<dyn LanguageModel>,
    accountant: TokenAccountant,
    history: Option<Arc<dyn HistoryStore>>,
}

impl GenerationService {
    pub fn new(model: Arc<dyn LanguageModel>, accountant: TokenAccountant) -> Self {
        Self {
            model,
            accountant,
            history: None,
        }
    }

    /// Persist every successful generation to `history`.
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn model(&self) -> &Arc<dyn LanguageModel> {
        &self.model
    }

    pub fn accountant(&self) -> &TokenAccountant {
        &self.accountant
    }

    /// Run the full pipeline on freeform `text`.
    #[instrument(skip_all, fields(mode = %mode, tool = %tool))]
    pub async fn generate(
        &self,
        text: &str,
        mode: Mode,
        tool: ExportTool,
    ) -> SmplResult<GenerationResult> {
        let request = NormalizeRequest::new(text, mode);
        info!(input_kind = %request.input_kind, "Normalizing input");

        let candidate = self.model.normalize(&request).await?;
        let schema = CanonicalSchema::validate(mode, &candidate)?;
        info!(title = %schema.title(), "Schema validated");

        let result = self.assemble(text, request.input_kind, schema, tool);
        self.persist(&result).await;
        Ok(result)
    }

    /// Rewrite `text` with the selected enhancements.
    ///
    /// Duplicates are dropped, keeping the first occurrence. Nothing is
    /// persisted.
    #[instrument(skip_all, fields(mode = %mode))]
    pub async fn enhance(
        &self,
        text: &str,
        mode: Mode,
        enhancements: &[Enhancement],
    ) -> SmplResult<Enhanced> {
        let mut selected: Vec<Enhancement> = Vec::with_capacity(enhancements.len());
        for enhancement in enhancements {
            if !selected.contains(enhancement) {
                selected.push(*enhancement);
            }
        }
        if selected.is_empty() {
            return Err(DomainError::NoEnhancements.into());
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "text" }.into());
        }

        let request = EnhanceRequest {
            text: text.to_string(),
            mode,
            enhancements: selected,
        };
        let enhanced = self.model.enhance(&request).await?;
        info!(
            enhancements = request.enhancements.len(),
            chars = enhanced.chars().count(),
            "Description enhanced"
        );

        Ok(Enhanced {
            original_length: request.text.chars().count(),
            enhanced_length: enhanced.chars().count(),
            text: enhanced,
            mode,
            enhancements: request.enhancements,
        })
    }

    /// Render and count an already-canonical schema. No model call.
    pub fn assemble(
        &self,
        text: &str,
        input_kind: InputKind,
        schema: CanonicalSchema,
        tool: ExportTool,
    ) -> GenerationResult {
        let slots = OutputSlots::render(&schema);
        let token_stats = self
            .accountant
            .stats(text, &slots.json, &slots.dsl, tool.family());

        GenerationResult {
            id: Uuid::new_v4(),
            input: text.to_string(),
            input_kind,
            tool,
            schema: Arc::new(schema),
            slots,
            token_stats,
        }
    }

    /// Recount a rewritten DSL against the original input and JSON.
    pub fn restat(&self, input: &str, json: &str, dsl: &str, tool: ExportTool) -> TokenStats {
        self.accountant.stats(input, json, dsl, tool.family())
    }

    /// History stores are synchronous and may touch disk, so the save runs
    /// on the blocking pool.
    async fn persist(&self, result: &GenerationResult) {
        let Some(history) = &self.history else {
            return;
        };
        let record = match result.to_record() {
            Ok(record) => record,
            Err(e) => {
                warn!(id = %result.id, error = %e, "Failed to build history record");
                return;
            }
        };

        let history = Arc::clone(history);
        match tokio::task::spawn_blocking(move || history.save(record)).await {
            Ok(Ok(())) => info!(id = %result.id, "Generation saved to history"),
            Ok(Err(e)) => warn!(id = %result.id, error = %e, "Failed to save generation to history"),
            Err(e) => warn!(id = %result.id, error = %e, "History save task did not complete"),
        }
    }
}
