//! `smpl tokens`: count tokens the way the token report does.

use smpl_core::prelude::*;

use crate::{
    cli::TokensArgs,
    commands::{accountant, read_text, resolve_tool},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TokensArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let text = read_text(args.text.as_deref(), args.file.as_deref())?;
    let family = match args.family {
        Some(family) => TokenizerFamily::from(family),
        None => resolve_tool(args.tool.as_deref(), config).family(),
    };

    let accountant = accountant();
    let generated = accountant.count(&text, family);
    let prose = accountant.count_input(&text, family);

    if output.is_json() {
        output.json(&serde_json::json!({
            "family": family,
            "characters": text.chars().count(),
            "words": text.split_whitespace().count(),
            "tokens": generated,
            "as_input": prose,
        }))?;
        return Ok(());
    }

    output.emit(&generated.to_string())?;
    if !generated.exact {
        output.info(&format!(
            "{family} has no public tokenizer; as freeform input this counts as {prose}"
        ))?;
    }
    Ok(())
}
