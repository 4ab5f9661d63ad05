//! `smpl config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.emit(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = config
                    .to_toml()
                    .with_cli_context(|| "Failed to serialise config")?;
                output.emit(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.emit(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<serde_json::Value> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    })
}

/// Strings print bare; everything else prints as JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
