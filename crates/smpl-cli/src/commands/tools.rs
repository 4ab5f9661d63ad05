//! `smpl tools`: list the export tools.

use serde_json::json;
use smpl_core::domain::{TOOL_REGISTRY, ToolDef};

use crate::{
    cli::{ListFormat, ToolsArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ToolsArgs, output: &OutputManager) -> CliResult<()> {
    if output.is_json() || args.format == ListFormat::Json {
        let tools: Vec<_> = TOOL_REGISTRY.iter().map(to_json).collect();
        output.json(&tools)?;
        return Ok(());
    }

    if args.format == ListFormat::List {
        for def in TOOL_REGISTRY {
            output.emit(def.tool.as_str())?;
        }
        return Ok(());
    }

    output.header(&format!("{} export tools", TOOL_REGISTRY.len()))?;
    output.emit(&format!(
        "{:<10} {:<14} {:<18} {:<7} {}",
        "ID", "NAME", "STYLE", "TOKENS", "SHRINK"
    ))?;
    for def in TOOL_REGISTRY {
        output.emit(&table_row(def))?;
    }
    Ok(())
}

fn table_row(def: &ToolDef) -> String {
    format!(
        "{:<10} {:<14} {:<18} {:<7} {}",
        def.tool.as_str(),
        def.label,
        def.style.as_str(),
        def.family.as_str(),
        def.strategy.as_str()
    )
}

fn to_json(def: &ToolDef) -> serde_json::Value {
    json!({
        "id": def.tool,
        "name": def.label,
        "description": def.description,
        "style": def.style.as_str(),
        "tokenizer": def.family,
        "exact_tokens": def.family.has_exact_tokenizer(),
        "strategy": def.strategy.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_start_with_identifier() {
        for def in TOOL_REGISTRY {
            assert!(table_row(def).starts_with(def.tool.as_str()));
        }
    }

    #[test]
    fn json_marks_exact_families() {
        let gpt = TOOL_REGISTRY
            .iter()
            .find(|d| d.tool.as_str() == "cursor")
            .map(to_json)
            .unwrap();
        assert_eq!(gpt["exact_tokens"], true);
        assert_eq!(gpt["tokenizer"], "gpt");
    }
}
