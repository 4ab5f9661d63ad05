//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] so `-v`, `-q`, `--config` and friends work
//! in any position.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`). Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info level (pipeline milestones)
    -vv     - Debug level (token counts, requests)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes. Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Also write logs to this file (no colours, non-blocking).
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Append logs to FILE"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI renders its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Headers and colours.
    Human,
    /// Bare text, no colours.
    Plain,
    /// One JSON document on stdout.
    Json,
}
