//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use smpl_core::domain::{Enhancement, Mode, TokenizerFamily};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "smpl",
    bin_name = "smpl",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Token-efficient app blueprints for AI coding tools",
    long_about = "SMPL turns a freeform description into a canonical schema, \
                  a compact DSL and export prompts tuned for each AI builder.",
    after_help = "EXAMPLES:\n\
        \x20 smpl generate \"a recipe app with favourites\" --tool cursor\n\
        \x20 smpl generate --file schema.prisma --mode app --show dsl,tokens\n\
        \x20 smpl render blueprint.json --format markdown\n\
        \x20 smpl session \"build a login form\" --mode prompt",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate schema, DSL, expanded spec and export prompts.
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n\
            \x20 smpl generate \"todo app with due dates\"\n\
            \x20 smpl generate --file notes.md --mode prompt --tool claude\n\
            \x20 smpl generate --schema blueprint.json --show all"
    )]
    Generate(GenerateArgs),

    /// Render a canonical schema file without calling a model.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl render blueprint.json\n\
            \x20 smpl render task.json --mode prompt --format export --tool v0")]
    Render(RenderArgs),

    /// Add UI/UX enhancements to a description.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl enhance \"a portfolio site\" --with hover-effects,modern-layouts\n\
            \x20 smpl enhance --file idea.md --mode prompt --with micro-interactions")]
    Enhance(EnhanceArgs),

    /// Count tokens for some text.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl tokens \"APP(Todo){ platform: web }\"\n\
            \x20 smpl tokens --file prompt.txt --family claude")]
    Tokens(TokensArgs),

    /// List supported export tools.
    #[command(visible_alias = "ls")]
    Tools(ToolsArgs),

    /// Generate, then shrink, expand and restore the DSL.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl session \"a habit tracker\"              # interactive\n\
            \x20 smpl session \"a habit tracker\" --steps shrink,restore")]
    Session(SessionArgs),

    /// Show recent generations.
    History(HistoryArgs),

    /// Write a default configuration file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl init            # user config directory\n\
            \x20 smpl init --local    # ./smpl.toml")]
    Init(InitArgs),

    /// Inspect the configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 smpl config get llm.model\n\
            \x20 smpl config list\n\
            \x20 smpl config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 smpl completions bash > ~/.local/share/bash-completion/completions/smpl\n\
            \x20 smpl completions zsh  > ~/.zfunc/_smpl")]
    Completions(CompletionsArgs),
}

// ── shared input ──────────────────────────────────────────────────────────────

/// Where the freeform input comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input text. Use `-` to read stdin.
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(short = 'f', long = "file", value_name = "PATH", help = "Read input from a file")]
    pub file: Option<PathBuf>,

    #[arg(short = 'm', long = "mode", value_enum, help = "Output mode [default: from config]")]
    pub mode: Option<ModeArg>,

    /// Target tool: cursor, claude, bolt, v0, replit, openai, anthropic.
    #[arg(short = 't', long = "tool", value_name = "TOOL", help = "Target tool [default: from config]")]
    pub tool: Option<String>,

    /// Use this canonical schema instead of calling the language model.
    #[arg(long = "schema", value_name = "FILE", help = "Answer normalization from a JSON file (offline)")]
    pub schema: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        short = 's',
        long = "show",
        value_enum,
        value_delimiter = ',',
        default_values_t = [View::Dsl, View::Export, View::Tokens],
        help = "Sections to print"
    )]
    pub show: Vec<View>,

    #[arg(long = "no-history", help = "Do not record this generation")]
    pub no_history: bool,
}

/// One printable section of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Json,
    Dsl,
    Expanded,
    /// The export prompt for the selected tool.
    Export,
    /// Export prompts for every tool.
    Exports,
    Tokens,
    All,
}

// ── render ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(value_name = "SCHEMA", help = "Canonical schema JSON file")]
    pub schema: PathBuf,

    #[arg(short = 'm', long = "mode", value_enum, default_value = "app")]
    pub mode: ModeArg,

    #[arg(long = "format", value_enum, default_value = "dsl")]
    pub format: RenderFormat,

    #[arg(short = 't', long = "tool", value_name = "TOOL", help = "Target tool for --format export")]
    pub tool: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Dsl,
    Json,
    Markdown,
    Export,
}

// ── enhance ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnhanceArgs {
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(short = 'm', long = "mode", value_enum, help = "Output mode [default: from config]")]
    pub mode: Option<ModeArg>,

    #[arg(
        short = 'w',
        long = "with",
        value_enum,
        value_delimiter = ',',
        required = true,
        value_name = "ENHANCEMENT,...",
        help = "Enhancements to apply"
    )]
    pub with: Vec<EnhancementArg>,

    #[arg(long = "offline", help = "Answer from the built-in scripted model")]
    pub offline: bool,
}

// ── tokens ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TokensArgs {
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(long = "family", value_enum, conflicts_with = "tool", help = "Tokenizer family")]
    pub family: Option<FamilyArg>,

    #[arg(short = 't', long = "tool", value_name = "TOOL", help = "Use the tool's tokenizer family")]
    pub tool: Option<String>,
}

// ── tools ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ToolsArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    /// One identifier per line.
    List,
    Json,
}

// ── session ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Run these steps in order instead of prompting.
    #[arg(long = "steps", value_enum, value_delimiter = ',', value_name = "STEP,...")]
    pub steps: Vec<SessionStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionStep {
    Shrink,
    Expand,
    Restore,
    Show,
}

// ── history ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(short = 'n', long = "limit", default_value_t = 10)]
    pub limit: usize,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `smpl.toml` in the current directory.
    #[arg(long = "local", help = "Create smpl.toml in the current directory")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `llm.model`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path of the configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    App,
    Prompt,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::App => Mode::App,
            ModeArg::Prompt => Mode::Prompt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    /// Exact counts (cl100k_base).
    Gpt,
    /// Approximate counts.
    Claude,
}

impl From<FamilyArg> for TokenizerFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Gpt => TokenizerFamily::Gpt,
            FamilyArg::Claude => TokenizerFamily::Claude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnhancementArg {
    ScrollAnimations,
    HoverEffects,
    GradientBackgrounds,
    TextAnimations,
    MicroInteractions,
    ModernLayouts,
}

impl From<EnhancementArg> for Enhancement {
    fn from(arg: EnhancementArg) -> Self {
        match arg {
            EnhancementArg::ScrollAnimations => Enhancement::ScrollAnimations,
            EnhancementArg::HoverEffects => Enhancement::HoverEffects,
            EnhancementArg::GradientBackgrounds => Enhancement::GradientBackgrounds,
            EnhancementArg::TextAnimations => Enhancement::TextAnimations,
            EnhancementArg::MicroInteractions => Enhancement::MicroInteractions,
            EnhancementArg::ModernLayouts => Enhancement::ModernLayouts,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
