//! `smpl init`: write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: &OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    if config_path.exists() && !args.force {
        return Err(CliError::ConfigExists { path: config_path });
    }

    let toml = AppConfig::default()
        .to_toml()
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    tracing::info!(path = %config_path.display(), "Configuration written");
    if output.is_json() {
        output.json(&serde_json::json!({ "path": config_path }))?;
    } else {
        output.success(&format!("Configuration created at {}", config_path.display()))?;
    }
    Ok(())
}
