//! Domain value objects: Platform, Mode, ExportTool, TokenizerFamily and the
//! per-tool style descriptors.
//!
//! # Design
//!
//! These are pure `Copy` value types with no identity.
//! They hold NO per-tool knowledge. Which style, tokenizer family and
//! compression strategy belong to a tool lives in `registry.rs`. This file's
//! only job is to define the types, their string representations, and their
//! `FromStr` parsers.
//!
//! # Adding New Tools
//!
//! 1. Add the `ExportTool` variant, its `as_str` arm and its `FromStr` arm here
//! 2. Add a `ToolDef` entry in `registry.rs`
//! 3. Add the template arms in `export/`

use crate::domain::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ── Platform ─────────────────────────────────────────────────────────────────

/// Target platform of an application blueprint.
///
/// Closed three-member set, matched exactly. `desktop` is not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Web,
    Mobile,
    Fullstack,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Self::Web, Self::Mobile, Self::Fullstack];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            "fullstack" => Ok(Self::Fullstack),
            other => Err(DomainError::UnsupportedPlatform {
                platform: other.to_string(),
            }),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Which canonical form a generation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full application blueprint (`AppSchema`).
    App,
    /// Single task or prompt (`PromptSchema`).
    Prompt,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "app" => Ok(Self::App),
            "prompt" => Ok(Self::Prompt),
            other => Err(DomainError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

// ── ExportTool ───────────────────────────────────────────────────────────────

/// A downstream AI coding assistant an export prompt can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTool {
    Cursor,
    Claude,
    Bolt,
    V0,
    Replit,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl ExportTool {
    /// Tool used when the caller names none, or names one we don't know.
    pub const DEFAULT: ExportTool = ExportTool::Cursor;

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Claude => "claude",
            Self::Bolt => "bolt",
            Self::V0 => "v0",
            Self::Replit => "replit",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Parse a tool identifier, falling back to [`ExportTool::DEFAULT`].
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: DomainError| {
            tracing::warn!(error = %e, fallback = %Self::DEFAULT, "Unknown tool, using default");
            Self::DEFAULT
        })
    }
}

impl Default for ExportTool {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ExportTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTool {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cursor" => Ok(Self::Cursor),
            "claude" | "claude-code" => Ok(Self::Claude),
            "bolt" | "bolt.new" => Ok(Self::Bolt),
            "v0" | "v0.dev" => Ok(Self::V0),
            "replit" => Ok(Self::Replit),
            "openai" | "chatgpt" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(DomainError::UnsupportedTool {
                tool: other.to_string(),
            }),
        }
    }
}

// ── TokenizerFamily ──────────────────────────────────────────────────────────

/// How tokens are counted for a tool's underlying model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerFamily {
    /// GPT models; open BPE vocabulary, counted exactly.
    Gpt,
    /// Closed vocabulary; approximated from length.
    Claude,
}

impl TokenizerFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::Claude => "claude",
        }
    }

    /// Whether an exact tokenizer exists for this family.
    pub const fn has_exact_tokenizer(&self) -> bool {
        matches!(self, Self::Gpt)
    }
}

impl fmt::Display for TokenizerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenizerFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt" | "openai" => Ok(Self::Gpt),
            "claude" | "anthropic" => Ok(Self::Claude),
            other => Err(DomainError::UnsupportedFamily {
                family: other.to_string(),
            }),
        }
    }
}

// ── ExportStyle ──────────────────────────────────────────────────────────────

/// Scaffolding style of an export prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportStyle {
    /// Lists files with explicit paths.
    FileCentric,
    /// Full context: JSON, DSL and an ordered implementation approach.
    Contextual,
    /// One full-stack build task with a fixed tech stack.
    SingleTask,
    /// UI components only.
    MinimalComponent,
    /// Numbered setup steps and a directory tree first.
    DirectoryFirst,
    /// Sectioned lists followed by the schema and a requirements checklist.
    Structured,
    /// Long-form guide with strategy and quality standards.
    Guide,
}

impl ExportStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FileCentric => "file-centric",
            Self::Contextual => "contextual",
            Self::SingleTask => "single-task",
            Self::MinimalComponent => "minimal-component",
            Self::DirectoryFirst => "directory-first",
            Self::Structured => "structured",
            Self::Guide => "guide",
        }
    }
}

impl fmt::Display for ExportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CompressionStrategy ──────────────────────────────────────────────────────

/// How the language model is asked to shrink a DSL for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionStrategy {
    Aggressive,
    Structured,
    ReduceNarrative,
    Atomic,
    Procedural,
    Balanced,
}

impl CompressionStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Structured => "structured",
            Self::ReduceNarrative => "reduce_narrative",
            Self::Atomic => "atomic",
            Self::Procedural => "procedural",
            Self::Balanced => "balanced",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Aggressive => {
                "Maximize compression, focus on component names and minimal structure"
            }
            Self::Structured => {
                "Keep logical structure, compress descriptions but maintain context"
            }
            Self::ReduceNarrative => "Remove narrative, keep technical specs and file references",
            Self::Atomic => "Break into atomic tasks, compress to single-line directives",
            Self::Procedural => "Compress into step-by-step procedural format",
            Self::Balanced => "Balance between clarity and token efficiency",
        }
    }
}

impl fmt::Display for CompressionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_is_closed_three_member_set() {
        assert_eq!("web".parse::<Platform>().unwrap(), Platform::Web);
        assert_eq!("fullstack".parse::<Platform>().unwrap(), Platform::Fullstack);
        for rejected in ["desktop", "full-stack", "WEB", " mobile"] {
            assert!(matches!(
                rejected.parse::<Platform>(),
                Err(DomainError::UnsupportedPlatform { .. })
            ));
        }
    }

    #[test]
    fn platform_deserializes_exact_names_only() {
        let p: Platform = serde_json::from_str(r#""mobile""#).unwrap();
        assert_eq!(p, Platform::Mobile);
        assert!(serde_json::from_str::<Platform>(r#""Mobile""#).is_err());
        assert!(serde_json::from_str::<Platform>(r#""desktop""#).is_err());
    }

    #[test]
    fn tool_round_trips_through_str() {
        for tool in [
            ExportTool::Cursor,
            ExportTool::Claude,
            ExportTool::Bolt,
            ExportTool::V0,
            ExportTool::Replit,
            ExportTool::OpenAi,
            ExportTool::Anthropic,
        ] {
            assert_eq!(tool.as_str().parse::<ExportTool>().unwrap(), tool);
        }
    }

    #[test]
    fn unknown_tool_is_unsupported() {
        assert!(matches!(
            "lovable".parse::<ExportTool>(),
            Err(DomainError::UnsupportedTool { tool }) if tool == "lovable"
        ));
    }

    #[test]
    fn unknown_tool_falls_back_to_default() {
        assert_eq!(ExportTool::parse_or_default("nope"), ExportTool::Cursor);
        assert_eq!(ExportTool::parse_or_default("Bolt.new"), ExportTool::Bolt);
    }

    #[test]
    fn mode_parses() {
        assert_eq!("App".parse::<Mode>().unwrap(), Mode::App);
        assert!("chat".parse::<Mode>().is_err());
    }
}
