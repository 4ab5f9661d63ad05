//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SMPL_<SECTION>__<KEY>`, e.g. `SMPL_LLM__MODEL`
//! 3. `./smpl.toml`, then the user config file (or only `--config` if given)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use smpl_adapters::OpenAiConfig;
use smpl_core::domain::{ExportTool, Mode};

/// File name for a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = "smpl.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Used when a command does not name a mode or tool.
    pub defaults: Defaults,
    /// Language model connection.
    pub llm: OpenAiConfig,
    /// Generation history.
    pub history: HistoryConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub mode: Mode,
    pub tool: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Defaults to `history.jsonl` in the user data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            mode: Mode::App,
            tool: ExportTool::DEFAULT.to_string(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            llm: OpenAiConfig::default(),
            history: HistoryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`. When given it must
    /// exist and replaces both the local and the user file.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("SMPL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `smpl.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "smpl", "smpl")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Where generations are recorded.
    pub fn history_path(&self) -> PathBuf {
        self.history.path.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("dev", "smpl", "smpl")
                .map(|d| d.data_dir().join("history.jsonl"))
                .unwrap_or_else(|| PathBuf::from(".smpl-history.jsonl"))
        })
    }

    /// The configured default tool. Unknown names fall back to the default.
    pub fn default_tool(&self) -> ExportTool {
        ExportTool::parse_or_default(&self.defaults.tool)
    }

    /// Look up a dotted key such as `llm.model`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.trim().replace('.', "/"));
        value.pointer(&pointer).cloned()
    }

    /// Render as TOML, as written by `smpl init`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.mode, Mode::App);
        assert_eq!(cfg.default_tool(), ExportTool::Cursor);
        assert!(cfg.history.enabled);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[defaults]\nmode = \"prompt\"\ntool = \"v0\"\n\n[llm]\nmodel = \"gpt-4o\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.mode, Mode::Prompt);
        assert_eq!(cfg.default_tool(), ExportTool::V0);
        assert_eq!(cfg.llm.model, "gpt-4o");
        // untouched keys keep their defaults
        assert_eq!(cfg.llm.max_input_chars, 10_000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn unknown_default_tool_falls_back() {
        let mut cfg = AppConfig::default();
        cfg.defaults.tool = "emacs".into();
        assert_eq!(cfg.default_tool(), ExportTool::DEFAULT);
    }

    #[test]
    fn dotted_get() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("llm.model"),
            Some(serde_json::Value::String("gpt-4o-mini".into()))
        );
        assert_eq!(cfg.get("history.enabled"), Some(serde_json::Value::Bool(true)));
        assert!(cfg.get("llm.nope").is_none());
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), AppConfig::default());
    }

    #[test]
    fn explicit_history_path_wins() {
        let mut cfg = AppConfig::default();
        cfg.history.path = Some(PathBuf::from("/tmp/h.jsonl"));
        assert_eq!(cfg.history_path(), PathBuf::from("/tmp/h.jsonl"));
    }
}
