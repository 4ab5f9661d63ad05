//! `smpl history`: list recent generations.

use smpl_adapters::JsonlHistory;
use smpl_core::prelude::*;

use crate::{
    cli::{HistoryArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: HistoryArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let store = JsonlHistory::new(config.history_path());
    let records = store.list(args.limit)?;

    if output.is_json() || args.format == ListFormat::Json {
        output.json(&records)?;
        return Ok(());
    }

    if records.is_empty() {
        output.info(&format!("No history yet ({})", store.path().display()))?;
        return Ok(());
    }

    if args.format == ListFormat::List {
        for record in &records {
            output.emit(&record.id.to_string())?;
        }
        return Ok(());
    }

    output.header(&format!("Last {} generation(s)", records.len()))?;
    for record in &records {
        output.emit(&summary_line(record))?;
    }
    Ok(())
}

fn summary_line(record: &GenerationRecord) -> String {
    let when = record
        .saved_at
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{when:<16}  {:<6}  {:<6}  {:>5} tok  {:>6.1}%  {}",
        record.mode.as_str(),
        record.input_type.as_str(),
        record.token_count,
        record.quality_score,
        preview(&record.input_text, 48)
    )
}

/// First line of `text`, cut to `max` characters.
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
