//! `smpl render`: convert a canonical schema file offline.

use smpl_core::prelude::*;

use crate::{
    cli::{RenderArgs, RenderFormat},
    commands::{read_file, resolve_tool},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: RenderArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let text = read_file(&args.schema)?;
    let schema = CanonicalSchema::parse(args.mode.into(), &text)?;
    let tool = resolve_tool(args.tool.as_deref(), config);
    tracing::debug!(title = %schema.title(), format = ?args.format, "Rendering schema");

    let rendered = render(&schema, args.format, tool);

    if output.is_json() {
        output.json(&serde_json::json!({
            "title": schema.title(),
            "mode": schema.mode(),
            "format": format!("{:?}", args.format).to_lowercase(),
            "output": rendered,
        }))?;
    } else {
        output.emit(&rendered)?;
    }
    Ok(())
}

fn render(schema: &CanonicalSchema, format: RenderFormat, tool: ExportTool) -> String {
    match format {
        RenderFormat::Dsl => schema.to_dsl(),
        RenderFormat::Json => schema.to_json(),
        RenderFormat::Markdown => schema.to_markdown(),
        RenderFormat::Export => {
            let json = schema.to_json();
            let dsl = schema.to_dsl();
            schema
                .exports(&dsl, &json)
                .remove(&tool)
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> CanonicalSchema {
        CanonicalSchema::validate(
            Mode::App,
            &json!({
                "app_name": "Notes",
                "platform": "web",
                "description": "",
                "pages": [{"id": "home", "type": "list", "title": "Home", "components": []}],
                "data_models": [],
                "actions": []
            }),
        )
        .unwrap()
    }

    #[test]
    fn dsl_format() {
        assert!(render(&schema(), RenderFormat::Dsl, ExportTool::Cursor).starts_with("APP(Notes){"));
    }

    #[test]
    fn export_format_targets_tool() {
        let cursor = render(&schema(), RenderFormat::Export, ExportTool::Cursor);
        let v0 = render(&schema(), RenderFormat::Export, ExportTool::V0);
        assert!(!cursor.is_empty());
        assert_ne!(cursor, v0);
    }
}
