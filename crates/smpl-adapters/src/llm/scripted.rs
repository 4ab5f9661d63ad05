//! Offline language model with fixed, deterministic answers.

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use smpl_core::{
    application::ports::{EnhanceRequest, LanguageModel, NormalizeRequest},
    domain::{DomainError, ExportTool},
    error::{SmplError, SmplResult},
};
use tracing::debug;

/// Answers `normalize` with a fixed candidate schema and rewrites DSL
/// mechanically. Used for `--schema FILE` runs and in tests.
#[derive(Debug, Clone)]
pub struct ScriptedModel {
    candidate: Value,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new(candidate: Value) -> Self {
        Self {
            candidate,
            delay: None,
        }
    }

    /// Load the candidate schema from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SmplResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SmplError::Configuration {
            message: format!("cannot read schema file {}: {e}", path.display()),
        })?;
        let candidate: Value = serde_json::from_str(&text).map_err(DomainError::from)?;
        Ok(Self::new(candidate))
    }

    /// Wait this long before answering shrink, expand and enhance.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn candidate(&self) -> &Value {
        &self.candidate
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Collapse indentation and blank lines into a single line per block.
fn compact(dsl: &str) -> String {
    dsl.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace("{ ", "{")
        .replace(" }", "}")
        .replace(": ", ":")
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn normalize(&self, request: &NormalizeRequest) -> SmplResult<Value> {
        debug!(mode = %request.mode, "Answering normalize from script");
        Ok(self.candidate.clone())
    }

    async fn shrink(&self, dsl: &str, _tool: ExportTool) -> SmplResult<String> {
        self.pause().await;
        Ok(compact(dsl))
    }

    async fn expand(&self, dsl: &str, tool: ExportTool) -> SmplResult<String> {
        self.pause().await;
        Ok(format!(
            "# {} prompt\n\nFormat: {}\n\n```\n{dsl}\n```",
            tool.label(),
            tool.style()
        ))
    }

    async fn enhance(&self, request: &EnhanceRequest) -> SmplResult<String> {
        self.pause().await;
        let mut out = format!("{}\n\n## UI/UX Enhancements\n", request.text.trim());
        for enhancement in &request.enhancements {
            out.push_str(&format!("\n- {}: {}", enhancement.label(), enhancement.instructions()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smpl_core::domain::{Enhancement, Mode};

    #[test]
    fn compact_flattens_layout() {
        let dsl = "APP(A){\n  platform: web\n  pages:\n    home[feed]: list\n}";
        assert_eq!(compact(dsl), "APP(A){platform:web pages:home[feed]:list}");
    }

    #[tokio::test]
    async fn normalize_returns_candidate_for_any_input() {
        let model = ScriptedModel::new(json!({"task": "t"}));
        let request = NormalizeRequest::new("anything", Mode::Prompt);
        assert_eq!(model.normalize(&request).await.unwrap(), json!({"task": "t"}));
    }

    #[tokio::test]
    async fn expand_names_the_tool() {
        let model = ScriptedModel::new(Value::Null);
        let out = model.expand("APP(A){}", ExportTool::Bolt).await.unwrap();
        assert!(out.starts_with("# Bolt.new prompt"));
        assert!(out.contains("APP(A){}"));
    }

    #[tokio::test]
    async fn enhance_appends_one_section() {
        let model = ScriptedModel::new(Value::Null);
        let request = EnhanceRequest {
            text: "A recipe app\n".into(),
            mode: Mode::App,
            enhancements: vec![Enhancement::HoverEffects, Enhancement::ModernLayouts],
        };
        let out = model.enhance(&request).await.unwrap();
        assert!(out.starts_with("A recipe app\n\n## UI/UX Enhancements\n"));
        assert_eq!(out.matches("UI/UX Enhancements").count(), 1);
        assert!(out.contains("- Hover effects: "));
        assert!(out.ends_with(Enhancement::ModernLayouts.instructions()));
    }

    #[test]
    fn from_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            ScriptedModel::from_file(&path),
            Err(SmplError::Domain(DomainError::MalformedJson { .. }))
        ));
    }

    #[test]
    fn from_file_missing_is_configuration_error() {
        assert!(matches!(
            ScriptedModel::from_file("/definitely/not/here.json"),
            Err(SmplError::Configuration { .. })
        ));
    }
}
