//! `smpl generate`: run the full pipeline once.

use serde_json::{Value, json};
use smpl_core::prelude::*;
use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, View},
    commands::{build_generator, read_text, resolve_mode, resolve_tool},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let text = read_text(args.input.text.as_deref(), args.input.file.as_deref())?;
    let mode = resolve_mode(args.input.mode, config);
    let tool = resolve_tool(args.input.tool.as_deref(), config);
    let service = build_generator(&args.input, config, !args.no_history)?;

    let spinner = output.spinner(format!("Generating {mode} schema for {}", tool.label()));
    let result = service.generate(&text, mode, tool).await;
    spinner.finish_and_clear();
    let result = result?;

    info!(id = %result.id, input_kind = %result.input_kind, "Generation complete");

    if output.is_json() {
        output.json(&to_json(&result, &args.show))?;
        return Ok(());
    }

    output.success(&format!(
        "{} ({} input, {} mode)",
        result.schema.title(),
        result.input_kind.label(),
        mode
    ))?;
    print_views(output, &args.show, &result.slots, Some(&result.token_stats), tool)?;
    Ok(())
}

/// Print the requested sections of a generation, in a fixed order.
pub(crate) fn print_views(
    output: &OutputManager,
    views: &[View],
    slots: &OutputSlots,
    stats: Option<&TokenStats>,
    tool: ExportTool,
) -> std::io::Result<()> {
    let wants = |view: View| views.contains(&view) || views.contains(&View::All);

    if wants(View::Json) {
        output.section("JSON", &slots.json)?;
    }
    if wants(View::Dsl) {
        output.section("SMPL DSL", &slots.dsl)?;
    }
    if wants(View::Expanded) {
        output.section("Expanded", &slots.expanded)?;
    }
    if wants(View::Exports) {
        for (each, prompt) in &slots.exports {
            output.section(&format!("Export: {}", each.label()), prompt)?;
        }
    } else if wants(View::Export) {
        output.section(&format!("Export: {}", tool.label()), slots.export_for(tool))?;
    }
    if wants(View::Tokens) {
        if let Some(stats) = stats {
            output.section("Tokens", &stats.report())?;
        }
    }
    Ok(())
}

fn to_json(result: &GenerationResult, views: &[View]) -> Value {
    let wants = |view: View| views.contains(&view) || views.contains(&View::All);
    let canonical: Value = serde_json::from_str(&result.slots.json).unwrap_or(Value::Null);

    let mut doc = json!({
        "id": result.id,
        "mode": result.mode(),
        "tool": result.tool,
        "input_kind": result.input_kind,
        "title": result.schema.title(),
    });
    if wants(View::Json) {
        doc["json"] = canonical;
    }
    if wants(View::Dsl) {
        doc["dsl"] = json!(result.slots.dsl);
    }
    if wants(View::Expanded) {
        doc["expanded"] = json!(result.slots.expanded);
    }
    if wants(View::Exports) {
        doc["export_prompts"] = json!(result.slots.exports);
    } else if wants(View::Export) {
        doc["export"] = json!(result.best_export());
    }
    if wants(View::Tokens) {
        doc["token_stats"] = json!(result.token_stats);
    }
    doc
}
