//! Command handlers, plus the wiring they share.
//!
//! Each handler receives parsed args, the loaded [`AppConfig`] and the
//! [`OutputManager`]. Adapters are built here and nowhere else.

pub mod completions;
pub mod config;
pub mod enhance;
pub mod generate;
pub mod history;
pub mod init;
pub mod render;
pub mod session;
pub mod tokens;
pub mod tools;

use std::io::{IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;

use smpl_adapters::{JsonlHistory, OpenAiClient, ScriptedModel, TiktokenCounter};
use smpl_core::prelude::*;
use tracing::debug;

use crate::{
    cli::InputArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Read freeform text from the argument, `--file`, or stdin.
pub(crate) fn read_text(text: Option<&str>, file: Option<&Path>) -> CliResult<String> {
    let raw = match (text, file) {
        (Some("-"), _) => read_stdin()?,
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => read_file(path)?,
        (None, None) if !std::io::stdin().is_terminal() => read_stdin()?,
        (None, None) => {
            return Err(CliError::invalid_input(
                "no input given; pass TEXT, --file PATH, or pipe text on stdin",
            ));
        }
    };

    if raw.trim().is_empty() {
        return Err(CliError::invalid_input("input is empty"));
    }
    Ok(raw)
}

pub(crate) fn read_file(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).with_cli_context(|| format!("Failed to read '{}'", path.display()))
}

fn read_stdin() -> CliResult<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .with_cli_context(|| "Failed to read stdin")?;
    Ok(buf)
}

pub(crate) fn resolve_mode(arg: Option<crate::cli::ModeArg>, config: &AppConfig) -> Mode {
    arg.map(Mode::from).unwrap_or(config.defaults.mode)
}

/// An unknown tool, given or configured, falls back to the default one.
pub(crate) fn resolve_tool(arg: Option<&str>, config: &AppConfig) -> ExportTool {
    match arg {
        Some(name) => ExportTool::parse_or_default(name),
        None => config.default_tool(),
    }
}

/// The offline model for `--schema`, otherwise the HTTP client.
pub(crate) fn build_model(schema: Option<&Path>, config: &AppConfig) -> CliResult<Arc<dyn LanguageModel>> {
    match schema {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "Using scripted model");
            Ok(Arc::new(ScriptedModel::from_file(path)?))
        }
        None => Ok(Arc::new(OpenAiClient::new(config.llm.clone())?)),
    }
}

pub(crate) fn accountant() -> TokenAccountant {
    TokenAccountant::new(Arc::new(TiktokenCounter::new()))
}

pub(crate) fn build_generator(
    input: &InputArgs,
    config: &AppConfig,
    record_history: bool,
) -> CliResult<GenerationService> {
    let model = build_model(input.schema.as_deref(), config)?;
    let service = GenerationService::new(model, accountant());
    if record_history && config.history.enabled {
        let path = config.history_path();
        debug!(path = %path.display(), "Recording history");
        Ok(service.with_history(Arc::new(JsonlHistory::new(path))))
    } else {
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_text_wins() {
        assert_eq!(read_text(Some("hello"), None).unwrap(), "hello");
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = read_text(Some("   "), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_text(None, Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn unknown_explicit_tool_falls_back_to_cursor() {
        let mut config = AppConfig::default();
        config.defaults.tool = "bolt".into();
        assert_eq!(resolve_tool(Some("emacs"), &config), ExportTool::Cursor);
    }

    #[test]
    fn configured_defaults_apply() {
        let mut config = AppConfig::default();
        config.defaults.mode = Mode::Prompt;
        config.defaults.tool = "bolt".into();
        assert_eq!(resolve_mode(None, &config), Mode::Prompt);
        assert_eq!(resolve_tool(None, &config), ExportTool::Bolt);
        assert_eq!(resolve_tool(Some("v0.dev"), &config), ExportTool::V0);
    }

    #[test]
    fn missing_schema_file_is_not_found() {
        let result = build_model(Some(Path::new("/nope/schema.json")), &AppConfig::default());
        assert!(matches!(result, Err(CliError::FileNotFound { .. })));
    }
}
