//! `smpl enhance`: add UI/UX enhancements to a description.

use std::sync::Arc;

use serde_json::Value;
use smpl_adapters::{OpenAiClient, ScriptedModel};
use smpl_core::prelude::*;
use tracing::{debug, instrument};

use crate::{
    cli::EnhanceArgs,
    commands::{accountant, read_text, resolve_mode},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: EnhanceArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let text = read_text(args.text.as_deref(), args.file.as_deref())?;
    let mode = resolve_mode(args.mode, config);
    let selected: Vec<Enhancement> = args.with.into_iter().map(Enhancement::from).collect();

    let model: Arc<dyn LanguageModel> = if args.offline {
        debug!("Using scripted model");
        Arc::new(ScriptedModel::new(Value::Null))
    } else {
        Arc::new(OpenAiClient::new(config.llm.clone())?)
    };
    let service = GenerationService::new(model, accountant());

    let spinner = output.spinner(format!("Enhancing {mode} description"));
    let enhanced = service.enhance(&text, mode, &selected).await;
    spinner.finish_and_clear();
    let enhanced = enhanced?;

    if output.is_json() {
        output.json(&enhanced)?;
        return Ok(());
    }

    let names = enhanced
        .enhancements
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ");
    output.success(&format!(
        "Enhanced with {names} ({} → {} chars)",
        enhanced.original_length, enhanced.enhanced_length
    ))?;
    output.section("Enhanced", &enhanced.text)?;
    Ok(())
}
